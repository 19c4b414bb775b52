//! Headless console host
//!
//! Stands in for the renderer and pointer layer: typed commands become
//! pointer events on the engine's command queue, and host callbacks become
//! printed lines.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use fusion_core::{ItemKind, Vec2};
use fusion_ecs::{Item, ItemHandle};
use fusion_game::{
    CombinationEngine, Command, CombineOutcome, CommandQueue, DiscoveryProgress, DragOutcome,
    GameHost, PointerEvent, ResetOutcome, Response,
};

const HELP: &str = "\
commands:
  list                  show the items on the table
  combine <i> <j>       drag item i onto item j
  drag <i> | hover <j> | leave | drop
                        step through a drag by hand
  spawn <Kind> [x y]    put a new item on the table
  found                 list discoveries
  hint <Kind>           recipes worth trying with a kind
  reset                 clear the table and start over
  help | quit";

/// Collects host callbacks as printable lines
#[derive(Debug, Default)]
pub struct ConsoleHost {
    lines: Vec<String>,
}

impl GameHost for ConsoleHost {
    fn item_spawned(&mut self, handle: ItemHandle, item: &Item) {
        tracing::debug!("sprite created for {} ({})", handle, item.kind);
    }

    fn discovery_progress(&mut self, progress: DiscoveryProgress) {
        self.lines.push(format!("Discoveries: {progress}"));
    }

    fn play_discovery_effect(&mut self, position: Vec2) {
        self.lines.push(format!(
            "* New discovery at ({:.2}, {:.2}) *",
            position.x, position.y
        ));
    }

    fn victory(&mut self) {
        self.lines.push("*** Victory! Every dish on the menu is yours. ***".to_string());
    }
}

/// One parsed line of input
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    List,
    Combine(u32, u32),
    Drag(u32),
    Hover(u32),
    Leave,
    Drop,
    Spawn {
        kind: ItemKind,
        position: Option<Vec2>,
    },
    Found,
    Hint(ItemKind),
    Reset,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("list" | "ls", []) => Self::List,
            ("combine", [i, j]) => Self::Combine(parse_slot(i)?, parse_slot(j)?),
            ("drag", [i]) => Self::Drag(parse_slot(i)?),
            ("hover", [j]) => Self::Hover(parse_slot(j)?),
            ("leave", []) => Self::Leave,
            ("drop", []) => Self::Drop,
            ("spawn", [_, ..]) => parse_spawn(&args)?,
            ("found", []) => Self::Found,
            ("hint", [_, ..]) => Self::Hint(ItemKind::new(args.join(" "))),
            ("reset" | "clear", []) => Self::Reset,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            (other, _) => bail!("unrecognised command '{other}' (try 'help')"),
        };
        Ok(Some(command))
    }
}

fn parse_slot(word: &str) -> Result<u32> {
    word.trim_start_matches('#')
        .parse()
        .with_context(|| format!("'{word}' is not an item number"))
}

/// `spawn Fried Rice 1.5 -2` -> kind "Fried Rice" at (1.5, -2)
fn parse_spawn(args: &[&str]) -> Result<ConsoleCommand> {
    let coords = match args {
        [.., x, y] if args.len() > 2 => x.parse::<f32>().ok().zip(y.parse::<f32>().ok()),
        _ => None,
    };
    let (name_words, position) = match coords {
        Some((x, y)) => (&args[..args.len() - 2], Some(Vec2::new(x, y))),
        None => (args, None),
    };
    Ok(ConsoleCommand::Spawn {
        kind: ItemKind::new(name_words.join(" ")),
        position,
    })
}

/// Reads commands, drives the engine and prints what happened
pub struct Console {
    engine: CombinationEngine<ConsoleHost>,
    queue: CommandQueue,
}

impl Console {
    pub fn new(engine: CombinationEngine<ConsoleHost>) -> Self {
        Self {
            engine,
            queue: CommandQueue::new(),
        }
    }

    pub fn engine(&self) -> &CombinationEngine<ConsoleHost> {
        &self.engine
    }

    /// Process `input` line by line until it ends or `quit` is read
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "Fusion - drag two items together to cook something new.")?;
        writeln!(out, "Type 'help' for commands.")?;
        self.flush_host(&mut out)?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            match ConsoleCommand::parse(&line) {
                Ok(None) => continue,
                Ok(Some(ConsoleCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command, &mut out)?,
                Err(e) => writeln!(out, "error: {e:#}")?,
            }
            self.flush_host(&mut out)?;
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: ConsoleCommand, out: &mut W) -> Result<()> {
        match command {
            ConsoleCommand::List => self.list(out)?,
            ConsoleCommand::Combine(i, j) => {
                let (Some(dragged), Some(target)) = (self.slot(i), self.slot(j)) else {
                    writeln!(out, "error: no such item")?;
                    return Ok(());
                };
                self.queue.push_drop(dragged, target);
            }
            ConsoleCommand::Drag(i) => match self.slot(i) {
                Some(handle) => self.queue.push(PointerEvent::Pressed(handle)),
                None => writeln!(out, "error: no item #{i}")?,
            },
            ConsoleCommand::Hover(j) => match self.slot(j) {
                Some(handle) => self.queue.push(PointerEvent::Entered(handle)),
                None => writeln!(out, "error: no item #{j}")?,
            },
            ConsoleCommand::Leave => {
                if let Some(handle) = self.engine.hovered() {
                    self.queue.push(PointerEvent::Exited(handle));
                }
            }
            ConsoleCommand::Drop => self.queue.push(PointerEvent::Released),
            ConsoleCommand::Spawn { kind, position } => {
                if kind.is_blank() {
                    writeln!(out, "error: spawn needs an item name")?;
                    return Ok(());
                }
                self.queue.push(Command::Spawn { kind, position });
            }
            ConsoleCommand::Found => self.found(out)?,
            ConsoleCommand::Hint(kind) => self.hint(&kind, out)?,
            ConsoleCommand::Reset => self.queue.push(Command::Reset),
            ConsoleCommand::Help => writeln!(out, "{HELP}")?,
            ConsoleCommand::Quit => {}
        }

        for response in self.engine.drain(&mut self.queue) {
            self.report(response, out)?;
        }
        Ok(())
    }

    /// Live handle whose slot number is `index`
    fn slot(&self, index: u32) -> Option<ItemHandle> {
        self.engine
            .world()
            .handles()
            .into_iter()
            .find(|handle| handle.index() == index)
    }

    fn report<W: Write>(&self, response: Response, out: &mut W) -> Result<()> {
        match response {
            Response::Drag(DragOutcome::Started) => {
                if let Some(handle) = self.engine.dragged() {
                    writeln!(out, "Holding #{}", handle.index())?;
                }
            }
            Response::Drag(DragOutcome::Rejected(reason)) => {
                writeln!(out, "Cannot drag: {reason}")?
            }
            Response::Hover(_) => {}
            Response::Combine(CombineOutcome::Combined {
                result,
                kind,
                position,
                ..
            }) => writeln!(
                out,
                "Made {kind} (#{}) at ({:.2}, {:.2})",
                result.index(),
                position.x,
                position.y
            )?,
            Response::Combine(CombineOutcome::NoRecipe) => writeln!(out, "Nothing happens.")?,
            Response::Combine(CombineOutcome::Rejected(reason)) => {
                writeln!(out, "No combination: {reason}")?
            }
            Response::Spawned(handle) => {
                if let Some(item) = self.engine.world().get(handle) {
                    writeln!(out, "Spawned {} (#{})", item.kind, handle.index())?;
                }
            }
            Response::Reset(ResetOutcome::Done) => writeln!(out, "Table cleared.")?,
            Response::Reset(ResetOutcome::Rejected(reason)) => {
                writeln!(out, "Cannot reset: {reason}")?
            }
        }
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        let world = self.engine.world();
        if world.is_empty() {
            writeln!(out, "The table is empty.")?;
        }
        for (handle, item) in world.iter() {
            writeln!(
                out,
                "#{:<3} {:<20} ({:>6.2}, {:>6.2})",
                handle.index(),
                item.kind,
                item.position.x,
                item.position.y
            )?;
        }
        Ok(())
    }

    fn found<W: Write>(&self, out: &mut W) -> Result<()> {
        let discoveries = self.engine.discoveries();
        let progress = discoveries.progress();
        writeln!(
            out,
            "Discoveries: {progress} ({:.0}%), {} to go, {} dishes in the book",
            progress.fraction() * 100.0,
            discoveries.remaining(),
            self.engine.recipes().results().len()
        )?;
        let names: Vec<&str> = discoveries.discovered().map(ItemKind::as_str).collect();
        writeln!(out, "{}", names.join(", "))?;
        Ok(())
    }

    /// Recipes with `kind` whose partner is known but whose result is not
    fn hint<W: Write>(&self, kind: &ItemKind, out: &mut W) -> Result<()> {
        let discoveries = self.engine.discoveries();
        let mut any = false;
        for recipe in self.engine.recipes().recipes_using(kind.as_str()) {
            let partner = if recipe.a == *kind { &recipe.b } else { &recipe.a };
            if discoveries.is_discovered(partner.as_str())
                && !discoveries.is_discovered(recipe.result.as_str())
            {
                writeln!(out, "Try {kind} + {partner}")?;
                any = true;
            }
        }
        if !any {
            writeln!(out, "Nothing new to make with {kind} yet.")?;
        }
        Ok(())
    }

    fn flush_host<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for line in self.engine.host_mut().lines.drain(..) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
