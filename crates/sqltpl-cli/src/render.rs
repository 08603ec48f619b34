use crate::cli::{RenderArgs, Source};
use crate::config::ConfigFile;
use crate::input::read_source;
use anyhow::Context;
use sqltpl::{QueryBuilder, Value};

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let file = ConfigFile::load(args.config.as_deref())?;
    crate::logging::init(&file.log.level)?;

    if args.template == Source::Stdin && args.args == Some(Source::Stdin) {
        anyhow::bail!("template and args cannot both be read from stdin");
    }

    let dialect = args.dialect.unwrap_or(file.dialect);
    let skip_token = args.skip_token.as_deref().unwrap_or(file.skip_token());

    let template = read_source(&args.template, "template")?;
    let values = match &args.args {
        Some(source) => parse_json_args(&read_source(source, "args")?, skip_token)?,
        None => Vec::new(),
    };

    let qb = QueryBuilder::new(dialect).with_config(file.builder_config());
    let sql = qb
        .build(&template, &values)
        .context("failed to render template")?;

    println!("{sql}");
    Ok(())
}

/// Parse a JSON array into template arguments.
///
/// A top-level string equal to `skip_token` becomes the skip marker. Nested
/// occurrences are left as strings, so they can never suppress a block.
pub fn parse_json_args(raw: &str, skip_token: &str) -> anyhow::Result<Vec<Value>> {
    let json: serde_json::Value =
        serde_json::from_str(raw).context("invalid args JSON")?;
    let serde_json::Value::Array(items) = json else {
        anyhow::bail!("args must be a JSON array");
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::String(s) if s == skip_token => sqltpl::skip(),
            other => Value::from(other),
        })
        .collect())
}
