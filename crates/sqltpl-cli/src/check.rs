use crate::cli::CheckArgs;
use crate::input::read_source;
use anyhow::Context;

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    crate::logging::init("warn")?;

    let template = read_source(&args.template, "template")?;
    let info = sqltpl::inspect(&template).context("invalid template")?;

    println!(
        "ok: {} placeholder(s), {} block(s)",
        info.arity(),
        info.blocks
    );
    for (i, p) in info.placeholders.iter().enumerate() {
        let note = if p.in_block { "  (in block, skippable)" } else { "" };
        println!("  #{i:<3} {:<2} at {}{note}", p.kind.as_str(), p.position);
    }
    Ok(())
}
