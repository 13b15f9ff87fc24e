//! Build script for panelbridge-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates panel.toml and bakes it into `panel_config.rs`

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_config();
}

/// Linker scripts; memory.x comes from embassy-stm32's `memory-x` feature
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml and emit the board configuration
fn generate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");
    let config: toml::Table = if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .unwrap_or_else(|e| fail(&[format!("Failed to read panel.toml: {}", e)]));
        toml::from_str(&content)
            .unwrap_or_else(|e| fail(&[format!("Invalid TOML in panel.toml: {}", e)]))
    } else {
        toml::Table::new()
    };

    let mut errors = Vec::new();
    let mut out = String::new();

    out.push_str("/// Link settings from panel.toml\n");
    out.push_str("pub fn link_config() -> LinkConfig {\n");
    out.push_str("    #[allow(unused_mut)]\n");
    out.push_str("    let mut config = LinkConfig::default();\n");

    if let Some(link) = section(&config, "link", &mut errors) {
        for (key, max) in [
            ("device_address", 0x7F),
            ("tx_timeout_ms", u32::MAX as i64),
            ("settle_ms", u8::MAX as i64),
            ("loops_per_ms", u32::MAX as i64),
        ] {
            match link.get(key) {
                None => {}
                Some(toml::Value::Integer(v)) if *v >= 0 && *v <= max => {
                    if key == "tx_timeout_ms" && *v == 0 {
                        errors.push("[link] tx_timeout_ms must be non-zero".to_string());
                    }
                    let _ = writeln!(out, "    config.{} = {};", key, v);
                }
                Some(_) => errors.push(format!("[link] {} must be an integer 0-{}", key, max)),
            }
        }
        for key in link.keys() {
            if !["device_address", "tx_timeout_ms", "settle_ms", "loops_per_ms"]
                .contains(&key.as_str())
            {
                errors.push(format!("[link] unknown key '{}'", key));
            }
        }
    }

    out.push_str("    config\n}\n\n");

    let rotation = match section(&config, "display", &mut errors)
        .and_then(|display| display.get("rotation"))
    {
        None => "R0",
        Some(toml::Value::String(r)) if r == "r0" => "R0",
        Some(toml::Value::String(r)) if r == "r2" => "R2",
        Some(_) => {
            errors.push("[display] rotation must be 'r0' or 'r2'".to_string());
            "R0"
        }
    };
    out.push_str("/// Panel rotation from panel.toml\n");
    let _ = writeln!(out, "pub const ROTATION: Rotation = Rotation::{};", rotation);

    if !errors.is_empty() {
        fail(&errors);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("panel_config.rs"), out).expect("write panel_config.rs");
}

fn section<'a>(
    config: &'a toml::Table,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::Table> {
    match config.get(name) {
        None => None,
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
    }
}

fn fail(errors: &[String]) -> ! {
    panic!(
        "\n\
        ERROR: Invalid panel.toml\n\
        {}\n",
        errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
