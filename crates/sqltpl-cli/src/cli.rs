use sqltpl::Dialect;
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "sqltpl.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Check,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Check(CheckArgs),
}

/// Where a piece of input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Inline(String),
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// `None` means `sqltpl.toml` if present.
    pub config: Option<PathBuf>,
    pub template: Source,
    /// `None` means no arguments.
    pub args: Option<Source>,
    pub dialect: Option<Dialect>,
    pub skip_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckArgs {
    pub template: Source,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "check" => parse_check(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn source_from_path(v: &str) -> Source {
    if v == "-" {
        Source::Stdin
    } else {
        Source::File(PathBuf::from(v))
    }
}

fn set_once(slot: &mut Option<Source>, value: Source, what: &str) -> anyhow::Result<()> {
    if slot.is_some() {
        anyhow::bail!("{what} given more than once");
    }
    *slot = Some(value);
    Ok(())
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config: Option<PathBuf> = None;
    let mut template: Option<Source> = None;
    let mut args: Option<Source> = None;
    let mut dialect: Option<Dialect> = None;
    let mut skip_token: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--template" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--template requires a value");
                };
                set_once(&mut template, Source::Inline(v.to_string()), "template")?;
            }
            _ if token.starts_with("--template=") => {
                let v = token.trim_start_matches("--template=");
                set_once(&mut template, Source::Inline(v.to_string()), "template")?;
            }
            "--template-file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--template-file requires a value");
                };
                set_once(&mut template, source_from_path(v), "template")?;
            }
            _ if token.starts_with("--template-file=") => {
                let v = token.trim_start_matches("--template-file=");
                set_once(&mut template, source_from_path(v), "template")?;
            }
            "--args" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--args requires a value");
                };
                set_once(&mut args, Source::Inline(v.to_string()), "args")?;
            }
            _ if token.starts_with("--args=") => {
                let v = token.trim_start_matches("--args=");
                set_once(&mut args, Source::Inline(v.to_string()), "args")?;
            }
            "--args-file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--args-file requires a value");
                };
                set_once(&mut args, source_from_path(v), "args")?;
            }
            _ if token.starts_with("--args-file=") => {
                let v = token.trim_start_matches("--args-file=");
                set_once(&mut args, source_from_path(v), "args")?;
            }
            "--dialect" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--dialect requires a value");
                };
                dialect = Some(v.parse().map_err(anyhow::Error::msg)?);
            }
            _ if token.starts_with("--dialect=") => {
                let v = token.trim_start_matches("--dialect=");
                dialect = Some(v.parse().map_err(anyhow::Error::msg)?);
            }
            "--skip-token" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--skip-token requires a value");
                };
                skip_token = Some(v.to_string());
            }
            _ if token.starts_with("--skip-token=") => {
                skip_token = Some(token.trim_start_matches("--skip-token=").to_string());
            }
            other if other.starts_with('-') && other != "-" => {
                anyhow::bail!("unknown argument: {other}")
            }
            other => set_once(&mut template, Source::Inline(other.to_string()), "template")?,
        }
    }

    let Some(template) = template else {
        if config.is_none() && args.is_none() && dialect.is_none() && skip_token.is_none() {
            return Ok(Command::Help(HelpTopic::Render));
        }
        anyhow::bail!("missing template: pass it inline, via --template or --template-file");
    };

    Ok(Command::Render(RenderArgs {
        config,
        template,
        args,
        dialect,
        skip_token,
    }))
}

fn parse_check<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut template: Option<Source> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Check)),
            "--template-file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--template-file requires a value");
                };
                set_once(&mut template, source_from_path(v), "template")?;
            }
            _ if token.starts_with("--template-file=") => {
                let v = token.trim_start_matches("--template-file=");
                set_once(&mut template, source_from_path(v), "template")?;
            }
            other if other.starts_with('-') && other != "-" => {
                anyhow::bail!("unknown argument: {other}")
            }
            other => set_once(&mut template, Source::Inline(other.to_string()), "template")?,
        }
    }

    let Some(template) = template else {
        return Ok(Command::Help(HelpTopic::Check));
    };
    Ok(Command::Check(CheckArgs { template }))
}

pub fn print_help(topic: HelpTopic) {
    let text = match topic {
        HelpTopic::Root => {
            "sqltpl - render SQL query templates\n\
             \n\
             USAGE:\n\
             \x20   sqltpl <COMMAND> [OPTIONS]\n\
             \n\
             COMMANDS:\n\
             \x20   render    Render a template with JSON arguments\n\
             \x20   check     Validate a template and list its placeholders\n\
             \n\
             Run `sqltpl <COMMAND> --help` for details.\n\
             Set SQLTPL_LOG (e.g. `debug`) to see build events on stderr.\n"
        }
        HelpTopic::Render => {
            "sqltpl render - render a template with JSON arguments\n\
             \n\
             USAGE:\n\
             \x20   sqltpl render <TEMPLATE> [--args <JSON>] [OPTIONS]\n\
             \n\
             OPTIONS:\n\
             \x20   --template <T>          Template text (alternative to the positional form)\n\
             \x20   --template-file <PATH>  Read the template from a file (`-` for stdin)\n\
             \x20   --args <JSON>           JSON array of arguments (default: [])\n\
             \x20   --args-file <PATH>      Read the JSON array from a file (`-` for stdin)\n\
             \x20   --dialect <NAME>        mysql (default) or ansi\n\
             \x20   --skip-token <S>        Top-level string treated as skip() (default: __SKIP__)\n\
             \x20   --config <PATH>         Config file (default: sqltpl.toml if present)\n"
        }
        HelpTopic::Check => {
            "sqltpl check - validate a template without arguments\n\
             \n\
             USAGE:\n\
             \x20   sqltpl check <TEMPLATE>\n\
             \x20   sqltpl check --template-file <PATH>\n"
        }
    };
    print!("{text}");
}
