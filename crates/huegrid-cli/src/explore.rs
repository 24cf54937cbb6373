use anyhow::{Context, Result};
use colored::Colorize;
use huegrid_core::{ColorCollection, HexColor, Settings, SwatchParams};
use huegrid_pipeline::{ColorAggregator, ColorApiClient, Explorer, ParamsDebouncer};
use huegrid_view::{
    Channel, Clipboard, Controls, CopyAcknowledgment, GridView, Osc52Clipboard, SwatchActivator,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::{print_output, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Set(Channel, String),
    Copy(String),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let arg = parts.next().unwrap_or_default().to_string();
    match verb {
        "s" | "sat" | "saturation" => Some(Command::Set(Channel::Saturation, arg)),
        "l" | "light" | "lightness" => Some(Command::Set(Channel::Lightness, arg)),
        "c" | "copy" => Some(Command::Copy(arg)),
        "show" => Some(Command::Show),
        "h" | "help" | "?" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Resolves a copy target: a 1-based swatch number or a hex code present in the grid.
fn resolve_copy_target(target: &str, collection: Option<&ColorCollection>) -> Result<HexColor> {
    let collection = collection
        .filter(|c| !c.is_empty())
        .context("No colors on screen to copy")?;

    if let Ok(number) = target.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| collection.get(index))
            .map(|record| record.hex.clone())
            .with_context(|| format!("No swatch numbered {}", number));
    }

    let hex: HexColor = target.parse()?;
    collection
        .find_by_hex(&hex)
        .map(|record| record.hex.clone())
        .with_context(|| format!("{} is not in the current grid", hex))
}

fn print_help() {
    println!("{}", "Commands:".cyan().bold());
    println!("  s <0-100>         set saturation");
    println!("  l <0-100>         set lightness");
    println!("  copy <#|hex>      copy a swatch's hex code");
    println!("  show              redraw the grid");
    println!("  quit              leave the explorer");
}

struct Session<F, C> {
    explorer: Arc<Explorer<F>>,
    debouncer: ParamsDebouncer,
    activator: SwatchActivator<C>,
    controls: Controls,
    format: OutputFormat,
}

impl<F, C> Session<F, C>
where
    F: huegrid_pipeline::ColorFetcher + 'static,
    C: Clipboard,
{
    fn frame(&mut self) -> GridView {
        let state = self.explorer.current();
        let acknowledged = self.activator.acknowledgment().visible();
        GridView::build(&state, &mut self.controls, acknowledged.as_ref())
    }

    fn redraw(&mut self) -> Result<()> {
        let view = self.frame();
        print_output(self.format, &view)
    }

    fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Set(channel, raw) => match self.controls.apply(channel, &raw) {
                Some(value) => {
                    match channel {
                        Channel::Saturation => self.debouncer.set_saturation(value),
                        Channel::Lightness => self.debouncer.set_lightness(value),
                    }
                    println!("{}", format!("{:?} -> {}%", channel, value).dimmed());
                }
                None if self.controls.is_disabled() => {
                    println!("{}", "Controls are locked while colors load".yellow());
                }
                None => {
                    println!("{}", format!("Ignored {:?} value '{}'", channel, raw).yellow());
                }
            },
            Command::Copy(target) => {
                let state = self.explorer.current();
                match resolve_copy_target(&target, state.collection()) {
                    Ok(hex) => self.activator.activate(&hex),
                    Err(e) => println!("{}", format!("{:#}", e).yellow()),
                }
            }
            Command::Show => self.redraw()?,
            Command::Help => print_help(),
            Command::Quit => {}
        }
        Ok(())
    }
}

pub async fn run(settings: &Settings, initial: SwatchParams, format: OutputFormat) -> Result<()> {
    let client = ColorApiClient::new(&settings.api).context("Failed to build HTTP client")?;
    info!("Exploring colors via {}", client.endpoint());

    let explorer = Arc::new(Explorer::new(
        ColorAggregator::new(client),
        settings.view.on_error,
    ));
    let debouncer = ParamsDebouncer::spawn(initial, settings.debounce.delay());
    let activator = SwatchActivator::new(
        Osc52Clipboard::stdout(),
        CopyAcknowledgment::new(settings.view.ack_duration()),
    );

    let mut states = explorer.subscribe();
    let mut acks = activator.acknowledgment().subscribe();
    let follower = {
        let explorer = Arc::clone(&explorer);
        let settled = debouncer.settled();
        tokio::spawn(async move { explorer.follow(settled).await })
    };

    let mut session = Session {
        explorer,
        debouncer,
        activator,
        controls: Controls::new(initial),
        format,
    };

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed");
                    break;
                };
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => session.handle(command)?,
                    None if line.trim().is_empty() => {}
                    None => println!("{}", format!("Unknown command '{}'", line.trim()).yellow()),
                }
            }
            Ok(()) = states.changed() => session.redraw()?,
            Ok(()) = acks.changed() => session.redraw()?,
        }
    }

    follower.abort();
    Ok(())
}
