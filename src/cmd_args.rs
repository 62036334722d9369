use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Settings file. Defaults to ~/.runeline/config or $RUNELINE_CONFIG_PATH.
    #[clap(short = 'c', long, help = "path to the settings file")]
    config: Option<String>,

    #[clap(short = 'p', long, help = "prompt shown before each line")]
    prompt: Option<String>,

    /// Start every line in Normal mode instead of Insert mode
    #[clap(long, help = "start each line in normal mode")]
    normal: bool,

    /// The terminal is in raw mode while editing, so logs only go to a file.
    #[clap(long, help = "write logs to this file")]
    log_file: Option<String>,

    #[clap(long, help = "log filter, e.g. debug or runeline=trace")]
    log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    config: Option<String>,
    prompt: Option<String>,
    normal: bool,
    log_file: Option<String>,
    log_level: Option<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            config: args.config,
            prompt: args.prompt,
            normal: args.normal,
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn normal(&self) -> bool {
        self.normal
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_should_read_long_flags() {
        let args = CommandLineArgs::parse_from([
            "runeline",
            "--config",
            "/tmp/rl.ini",
            "--prompt",
            "> ",
            "--normal",
            "--log-file",
            "/tmp/rl.log",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.config(), Some("/tmp/rl.ini"));
        assert_eq!(args.prompt(), Some("> "));
        assert!(args.normal());
        assert_eq!(args.log_file(), Some("/tmp/rl.log"));
        assert_eq!(args.log_level(), Some("debug"));
    }

    #[test]
    fn parse_should_accept_short_flags() {
        let args = CommandLineArgs::parse_from(["runeline", "-c", "cfg", "-p", "% "]);
        assert_eq!(args.config(), Some("cfg"));
        assert_eq!(args.prompt(), Some("% "));
    }

    #[test]
    fn parse_should_default_to_nothing() {
        let args = CommandLineArgs::parse_from(["runeline"]);
        assert_eq!(args.config(), None);
        assert_eq!(args.prompt(), None);
        assert!(!args.normal());
        assert_eq!(args.log_file(), None);
    }
}
