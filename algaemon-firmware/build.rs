//! Build script for algaemon-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates monitor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section, with their expected kind
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "sensors",
        &[
            ("room_pin", Kind::Integer),
            ("algae_pin", Kind::Integer),
            ("samples_per_read", Kind::Integer),
            ("calibration_samples", Kind::Integer),
            ("sample_delay_ms", Kind::Integer),
            ("adc_resolution", Kind::Number),
            ("reference_voltage", Kind::Number),
            ("mv_per_degree", Kind::Number),
        ],
    ),
    (
        "display",
        &[
            ("i2c_address", Kind::Integer),
            ("cols", Kind::Integer),
            ("rows", Kind::Integer),
            ("valid_min_c", Kind::Number),
            ("valid_max_c", Kind::Number),
        ],
    ),
    (
        "timing",
        &[
            ("update_interval_ms", Kind::Integer),
            ("fluctuation_interval_ms", Kind::Integer),
        ],
    ),
    ("serial", &[("baudrate", Kind::Integer)]),
    (
        "simulation",
        &[
            ("room_start_c", Kind::Number),
            ("algae_start_c", Kind::Number),
            ("step_c", Kind::Number),
            ("recenter_threshold_c", Kind::Number),
            ("recenter_spread_c", Kind::Number),
            ("setpoint_min_c", Kind::Number),
            ("setpoint_max_c", Kind::Number),
        ],
    ),
];

#[derive(Clone, Copy)]
enum Kind {
    Integer,
    /// Integer or float
    Number,
}

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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate monitor.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=monitor.toml");

    let config_path = Path::new("monitor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: monitor.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a monitor.toml configuration file.          ║\n\
            ║  Please create one in the algaemon-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read monitor.toml                              ║\n\
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
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in monitor.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    validate_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid monitor configuration                            ║\n\
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

    println!("cargo:warning=monitor.toml validated successfully");
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

/// Only known sections and keys, each with the right value type
///
/// The firmware's own parser understands flat `[section]` tables with
/// integer and float values, nothing more.
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (section, value) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            let Some((_, kind)) = keys.iter().find(|(name, _)| name == key) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            let ok = match kind {
                Kind::Integer => value.is_integer(),
                Kind::Number => value.is_integer() || value.is_float(),
            };
            if !ok {
                errors.push(format!("[{}] {} has the wrong type", section, key));
            }
        }
    }
}

fn number(config: &toml::Value, section: &str, key: &str) -> Option<f64> {
    match config.get(section)?.get(key)? {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Ranges the firmware would otherwise reject at boot
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let positive = [
        ("sensors", "samples_per_read"),
        ("sensors", "calibration_samples"),
        ("sensors", "adc_resolution"),
        ("sensors", "reference_voltage"),
        ("sensors", "mv_per_degree"),
        ("display", "cols"),
        ("display", "rows"),
        ("timing", "update_interval_ms"),
        ("timing", "fluctuation_interval_ms"),
        ("serial", "baudrate"),
    ];
    for (section, key) in positive {
        if let Some(v) = number(config, section, key) {
            if v <= 0.0 {
                errors.push(format!("[{}] {} must be greater than 0", section, key));
            }
        }
    }

    let bytes = [
        ("sensors", "room_pin", 255.0),
        ("sensors", "algae_pin", 255.0),
        ("sensors", "samples_per_read", 255.0),
        ("sensors", "calibration_samples", 255.0),
        ("display", "i2c_address", 127.0),
        ("display", "cols", 40.0),
        ("display", "rows", 4.0),
    ];
    for (section, key, max) in bytes {
        if let Some(v) = number(config, section, key) {
            if v < 0.0 || v > max {
                errors.push(format!("[{}] {} must be 0-{}", section, key, max));
            }
        }
    }

    if let (Some(min), Some(max)) = (
        number(config, "display", "valid_min_c"),
        number(config, "display", "valid_max_c"),
    ) {
        if min >= max {
            errors.push("[display] valid_min_c must be below valid_max_c".to_string());
        }
    }

    if let (Some(min), Some(max)) = (
        number(config, "simulation", "setpoint_min_c"),
        number(config, "simulation", "setpoint_max_c"),
    ) {
        if min >= max {
            errors.push("[simulation] setpoint_min_c must be below setpoint_max_c".to_string());
        }
    }
}
