use clap::Parser;
use form_designer::cli::commands::{cmd_palette, cmd_preview, cmd_replay, cmd_stats, cmd_validate};
use form_designer::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    form_designer::init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Palette => cmd_palette()?,
        Commands::Preview { content, view } => cmd_preview(&content, &view)?,
        Commands::Validate {
            content,
            values,
            format,
        } => {
            let ok = cmd_validate(&content, &values, format.as_deref(), &config)?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Replay {
            script,
            content,
            format,
            output,
        } => {
            let all_passed = cmd_replay(
                &script,
                content.as_deref(),
                format.as_deref(),
                output.as_deref(),
                cli.trace.as_deref(),
                &config,
            )?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Stats { forms, form_id } => cmd_stats(&forms, form_id)?,
    }

    Ok(())
}
