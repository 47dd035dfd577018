use std::env;

use task_manager_rs::ClientConfig;

use crate::models::CLIConfig;

pub fn parse_config() -> CLIConfig {
    let base = ClientConfig::from_env();
    let cfg = CLIConfig {
        base_url: base.base_url,
        timeout_secs: base.request_timeout.map(|d| d.as_secs()),
        email: env_opt("TASK_MANAGER_EMAIL"),
        debug: env_bool("TASK_MANAGER_DEBUG", false),
    };
    let args: Vec<String> = env::args().skip(1).collect();
    apply_args(cfg, &args)
}

fn apply_args(mut cfg: CLIConfig, args: &[String]) -> CLIConfig {
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--base" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.base_url = value.clone();
                    idx += 1;
                }
            }
            "--timeout" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Ok(parsed) = value.parse::<u64>() {
                        cfg.timeout_secs = if parsed == 0 { None } else { Some(parsed) };
                    }
                    idx += 1;
                }
            }
            "--email" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.email = Some(value.clone());
                    idx += 1;
                }
            }
            "--debug" => {
                if let Some(value) = args.get(idx + 1) {
                    if value.starts_with('-') {
                        cfg.debug = true;
                    } else if let Ok(parsed) = value.parse::<bool>() {
                        cfg.debug = parsed;
                        idx += 1;
                    } else {
                        cfg.debug = true;
                    }
                } else {
                    cfg.debug = true;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    cfg
}

fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn env_bool(key: &str, fallback: bool) -> bool {
    match env::var(key) {
        Ok(value) => value.parse::<bool>().unwrap_or(fallback),
        Err(_) => fallback,
    }
}
