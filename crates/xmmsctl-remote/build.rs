//! Locates the system libxmms when the `system-libxmms` feature is enabled.
//!
//! `xmms-config` (or the program named by `XMMS_CONFIG`) provides compiler
//! and linker flags. A probe program calling `xmms_remote_get_version` is then
//! compiled and linked with those flags; the build fails if it does not link.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=XMMS_CONFIG");

    #[cfg(feature = "system-libxmms")]
    system::configure();
}

#[cfg(feature = "system-libxmms")]
mod system {
    use std::env;
    use std::path::PathBuf;
    use std::process::Command;

    const PROBE: &str = r#"#include <xmms/xmmsctrl.h>
int main(void) { return xmms_remote_get_version(0) < 0; }
"#;

    fn query(tool: &str, flag: &str) -> Vec<String> {
        let output = Command::new(tool).arg(flag).output().unwrap_or_else(|e| {
            panic!("failed to run `{tool} {flag}`: {e}; install the XMMS development files or set XMMS_CONFIG")
        });
        if !output.status.success() {
            panic!(
                "`{tool} {flag}` failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        String::from_utf8_lossy(&output.stdout)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn configure() {
        let tool = env::var("XMMS_CONFIG").unwrap_or_else(|_| "xmms-config".to_string());
        let cflags = query(&tool, "--cflags");
        let libs = query(&tool, "--libs");

        if !libs.iter().any(|flag| flag == "-lxmms") {
            panic!("`{tool} --libs` does not list -lxmms: {}", libs.join(" "));
        }

        probe(&cflags, &libs);

        for flag in &libs {
            if let Some(dir) = flag.strip_prefix("-L") {
                println!("cargo:rustc-link-search=native={dir}");
            } else if let Some(lib) = flag.strip_prefix("-l") {
                println!("cargo:rustc-link-lib={lib}");
            } else {
                println!("cargo:rustc-link-arg={flag}");
            }
        }
    }

    fn probe(cflags: &[String], libs: &[String]) {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
        let source = out_dir.join("xmms_probe.c");
        let binary = out_dir.join("xmms_probe");
        std::fs::write(&source, PROBE).expect("failed to write probe source");

        let compiler = cc::Build::new().cargo_metadata(false).get_compiler();
        let status = compiler
            .to_command()
            .args(cflags)
            .arg(&source)
            .arg("-o")
            .arg(&binary)
            .args(libs)
            .status()
            .unwrap_or_else(|e| panic!("failed to run the C compiler: {e}"));

        if !status.success() {
            panic!("libxmms does not provide xmms_remote_get_version (probe failed to link)");
        }
    }
}
