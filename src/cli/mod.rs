use std::env;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 默认模式：启动 HTTP 查询服务
    Serve,
    /// 批量装载：`ipdb load [file] [--batch-size N]`
    Load {
        input: Option<String>,
        batch_size: Option<usize>,
    },
    Help,
}

#[derive(Debug, Clone)]
pub enum CliError {
    ParseError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

pub struct CliParser;

impl Default for CliParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CliParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self) -> Result<Command, CliError> {
        let args: Vec<String> = env::args().collect();
        self.parse_args(&args)
    }

    pub fn parse_args(&self, args: &[String]) -> Result<Command, CliError> {
        if args.len() < 2 {
            return Ok(Command::Serve);
        }

        match args[1].as_str() {
            "help" | "--help" | "-h" => Ok(Command::Help),
            "serve" => Ok(Command::Serve),
            "load" => self.parse_load_command(&args[2..]),
            other => Err(CliError::ParseError(format!("Unknown command: {}", other))),
        }
    }

    fn parse_load_command(&self, args: &[String]) -> Result<Command, CliError> {
        let mut input: Option<String> = None;
        let mut batch_size: Option<usize> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--batch-size" => {
                    if i + 1 < args.len() {
                        let size = args[i + 1].parse().map_err(|_| {
                            CliError::ParseError(format!(
                                "--batch-size requires a positive integer, got '{}'",
                                args[i + 1]
                            ))
                        })?;
                        batch_size = Some(size);
                        i += 2;
                    } else {
                        return Err(CliError::ParseError(
                            "--batch-size requires a value".to_string(),
                        ));
                    }
                }
                arg if arg.starts_with("--") => {
                    return Err(CliError::ParseError(format!("Unknown option: {}", arg)));
                }
                path => {
                    if input.is_some() {
                        return Err(CliError::ParseError(
                            "load command accepts at most one input file".to_string(),
                        ));
                    }
                    input = Some(path.to_string());
                    i += 1;
                }
            }
        }

        Ok(Command::Load { input, batch_size })
    }
}

pub fn print_help() {
    println!("ipdb - IP range geolocation lookup service");
    println!();
    println!("USAGE:");
    println!("    ipdb                              Start the HTTP lookup server");
    println!("    ipdb serve                        Same as above");
    println!("    ipdb load [file] [--batch-size N] Bulk-load a JSONL range file (full replace)");
    println!("    ipdb help                         Show this help");
    println!();
    println!("The load input defaults to load.input_path from the configuration.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("ipdb")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_no_args_means_serve() {
        let cmd = CliParser::new().parse_args(&args(&[])).unwrap();
        assert_eq!(cmd, Command::Serve);
    }

    #[test]
    fn test_load_with_file_and_batch_size() {
        let cmd = CliParser::new()
            .parse_args(&args(&["load", "ranges.jsonl", "--batch-size", "500"]))
            .unwrap();
        assert_eq!(
            cmd,
            Command::Load {
                input: Some("ranges.jsonl".to_string()),
                batch_size: Some(500),
            }
        );
    }

    #[test]
    fn test_load_defaults() {
        let cmd = CliParser::new().parse_args(&args(&["load"])).unwrap();
        assert_eq!(
            cmd,
            Command::Load {
                input: None,
                batch_size: None,
            }
        );
    }

    #[test]
    fn test_bad_batch_size() {
        assert!(
            CliParser::new()
                .parse_args(&args(&["load", "--batch-size", "lots"]))
                .is_err()
        );
        assert!(
            CliParser::new()
                .parse_args(&args(&["load", "--batch-size"]))
                .is_err()
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(CliParser::new().parse_args(&args(&["frobnicate"])).is_err());
    }
}
