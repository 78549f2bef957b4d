//! Build script for mochi-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "faces",
        &["time", "weather", "forecast", "notification", "navigation"],
    ),
    ("dwell", &["time_ms", "weather_ms", "forecast_ms"]),
    ("notification", &["display_ms", "navigation_display_ms"]),
    ("weather", &["max_age_ms"]),
    ("scroll", &["step_ms", "pause_ms", "visible_chars"]),
    ("redraw", &["time_ms", "navigation_ms"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a display.toml configuration file.          ║\n\
            ║  Please create one in the mochi-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_layout(&config, &mut errors);
    validate_faces(&config, &mut errors);
    validate_timings(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections and keys, with values of the right type
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(keys) = SECTIONS.iter().find(|(s, _)| s == name).map(|(_, k)| k) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };

        for (key, value) in table {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
                continue;
            }
            let ok = match name.as_str() {
                "faces" => value.is_bool(),
                _ => value.as_integer().is_some_and(|v| (0..=u32::MAX as i64).contains(&v)),
            };
            if !ok {
                let expected = if name == "faces" {
                    "true or false"
                } else {
                    "a non-negative integer"
                };
                errors.push(format!("[{}] {} must be {}", name, key, expected));
            }
        }
    }
}

/// At least one face enabled, and enabled rotating faces need a dwell
fn validate_faces(config: &toml::Value, errors: &mut Vec<String>) {
    let enabled = |face: &str| {
        get(config, "faces", face)
            .and_then(toml::Value::as_bool)
            .unwrap_or(true)
    };

    let faces = ["time", "weather", "forecast", "notification", "navigation"];
    if !faces.iter().any(|face| enabled(face)) {
        errors.push("[faces] at least one face must be enabled".to_string());
    }

    for face in ["time", "weather", "forecast"] {
        let key = format!("{}_ms", face);
        if enabled(face) && integer(config, "dwell", &key) == Some(0) {
            errors.push(format!("[dwell] {} must be non-zero", key));
        }
    }
}

/// Timing values the scheduler cannot honour
fn validate_timings(config: &toml::Value, errors: &mut Vec<String>) {
    let display_ms = integer(config, "notification", "display_ms").unwrap_or(6000);
    let navigation_ms = integer(config, "notification", "navigation_display_ms").unwrap_or(3000);
    if display_ms == 0 {
        errors.push("[notification] display_ms must be non-zero".to_string());
    }
    if navigation_ms >= display_ms {
        errors.push(
            "[notification] navigation_display_ms must be below display_ms".to_string(),
        );
    }

    if integer(config, "weather", "max_age_ms") == Some(0) {
        errors.push("[weather] max_age_ms must be non-zero".to_string());
    }
    if integer(config, "scroll", "step_ms") == Some(0) {
        errors.push("[scroll] step_ms must be non-zero".to_string());
    }
    if integer(config, "scroll", "visible_chars").is_some_and(|v| v == 0 || v > 255) {
        errors.push("[scroll] visible_chars must be 1-255".to_string());
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section)?.get(key)
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    get(config, section, key)?.as_integer()
}
