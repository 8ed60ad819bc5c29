//! Console command grammar.
//!
//! One command per line, whitespace separated. Bases may be given by name or
//! index, species and items by catalog key.

use campaign_core::{AircraftId, EmployeeId};
use runtime::{ContainmentCommand, TransferRequest};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  add <base> <species> [dead]          put one specimen into a containment
  kill <base> [species]                kill every live specimen, or one of a species
  consume <base> <amount>              use live specimens for research
  collect <aircraft> <species> <alive> <dead>
  settle <aircraft>                    unload aircraft cargo at its homebase
  summary <base>
  transfers [n]                        list in-flight transfers, or the n-th (1-based)
  ship <from> <to> <part>...           parts: item=<key>:<n> alien=<key>:<alive>:<dead>
                                              employee=<ucn> aircraft=<idx>
  recover <aircraft> <base>            ship mission cargo from the aircraft
  advance <hours>
  resume
  research <tech>
  save <slot> | load <slot>
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Containment(ContainmentCommand),
    Summary(String),
    Transfers(Option<usize>),
    Ship {
        source: String,
        destination: String,
        request: TransferRequest,
    },
    Recover {
        aircraft: AircraftId,
        destination: String,
    },
    /// Game hours to advance.
    Advance(u64),
    Resume,
    Research(String),
    Save(String),
    Load(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' is missing its {argument}")]
    Missing {
        command: String,
        argument: &'static str,
    },
    #[error("'{0}' is not a valid number")]
    Number(String),
    #[error("cannot read transfer part '{0}'")]
    Part(String),
}

impl std::str::FromStr for ConsoleCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseError::Empty)?;
        let mut args = Args {
            command: name,
            words,
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "add" => {
                let base = args.text("base")?;
                let species = args.text("species")?;
                let dead = args.optional().is_some_and(|word| word == "dead");
                ConsoleCommand::Containment(ContainmentCommand::AddOne {
                    base,
                    species,
                    dead,
                })
            }
            "kill" => {
                let base = args.text("base")?;
                match args.optional() {
                    Some(species) => ConsoleCommand::Containment(ContainmentCommand::KillOne {
                        base,
                        species: species.to_owned(),
                    }),
                    None => ConsoleCommand::Containment(ContainmentCommand::KillAll { base }),
                }
            }
            "consume" => ConsoleCommand::Containment(ContainmentCommand::ConsumeForResearch {
                base: args.text("base")?,
                amount: args.number("amount")?,
            }),
            "collect" => ConsoleCommand::Containment(ContainmentCommand::Collect {
                aircraft: AircraftId(args.number("aircraft")?),
                species: args.text("species")?,
                alive: args.number("alive count")?,
                dead: args.number("dead count")?,
            }),
            "settle" => ConsoleCommand::Containment(ContainmentCommand::Settle {
                aircraft: AircraftId(args.number("aircraft")?),
            }),
            "summary" => ConsoleCommand::Summary(args.text("base")?),
            "transfers" => ConsoleCommand::Transfers(
                args.optional().map(parse_number::<usize>).transpose()?,
            ),
            "ship" => {
                let source = args.text("source base")?;
                let destination = args.text("destination base")?;
                let mut request = TransferRequest::new();
                for part in args.rest() {
                    request = parse_part(request, part)?;
                }
                ConsoleCommand::Ship {
                    source,
                    destination,
                    request,
                }
            }
            "recover" => ConsoleCommand::Recover {
                aircraft: AircraftId(args.number("aircraft")?),
                destination: args.text("base")?,
            },
            "advance" => ConsoleCommand::Advance(args.number("hours")?),
            "resume" => ConsoleCommand::Resume,
            "research" => ConsoleCommand::Research(args.text("technology")?),
            "save" => ConsoleCommand::Save(args.text("slot")?),
            "load" => ConsoleCommand::Load(args.text("slot")?),
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

struct Args<'a, I> {
    command: &'a str,
    words: I,
}

impl<'a, I: Iterator<Item = &'a str>> Args<'a, I> {
    fn optional(&mut self) -> Option<&'a str> {
        self.words.next()
    }

    fn required(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        self.optional().ok_or_else(|| ParseError::Missing {
            command: self.command.to_owned(),
            argument,
        })
    }

    fn text(&mut self, argument: &'static str) -> Result<String, ParseError> {
        self.required(argument).map(str::to_owned)
    }

    fn number<T: std::str::FromStr>(&mut self, argument: &'static str) -> Result<T, ParseError> {
        parse_number(self.required(argument)?)
    }

    fn rest(self) -> I {
        self.words
    }
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse().map_err(|_| ParseError::Number(word.to_owned()))
}

fn parse_part(request: TransferRequest, part: &str) -> Result<TransferRequest, ParseError> {
    let invalid = || ParseError::Part(part.to_owned());
    let (kind, value) = part.split_once('=').ok_or_else(invalid)?;
    let fields: Vec<&str> = value.split(':').collect();
    let request = match (kind, fields.as_slice()) {
        ("item", [key, amount]) => request.item(*key, parse_number(amount)?),
        ("alien", [key, alive, dead]) => {
            request.aliens(*key, parse_number(alive)?, parse_number(dead)?)
        }
        ("employee", [id]) => request.employee(EmployeeId(parse_number(id)?)),
        ("aircraft", [id]) => request.aircraft(AircraftId(parse_number(id)?)),
        _ => return Err(invalid()),
    };
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ConsoleCommand, ParseError> {
        line.parse()
    }

    #[test]
    fn add_defaults_to_alive() {
        assert_eq!(
            parse("add Headquarters ortnok").unwrap(),
            ConsoleCommand::Containment(ContainmentCommand::AddOne {
                base: "Headquarters".into(),
                species: "ortnok".into(),
                dead: false,
            })
        );
        assert!(matches!(
            parse("ADD 0 taman dead").unwrap(),
            ConsoleCommand::Containment(ContainmentCommand::AddOne { dead: true, .. })
        ));
    }

    #[test]
    fn kill_picks_one_or_all() {
        assert!(matches!(
            parse("kill 0").unwrap(),
            ConsoleCommand::Containment(ContainmentCommand::KillAll { .. })
        ));
        assert!(matches!(
            parse("kill 0 ortnok").unwrap(),
            ConsoleCommand::Containment(ContainmentCommand::KillOne { .. })
        ));
    }

    #[test]
    fn ship_collects_every_part() {
        let ConsoleCommand::Ship { request, .. } =
            parse("ship 0 1 item=medikit:3 alien=ortnok:1:2 employee=4 aircraft=0").unwrap()
        else {
            panic!("expected ship");
        };
        assert_eq!(request.items, vec![("medikit".to_owned(), 3)]);
        assert_eq!(request.aliens, vec![("ortnok".to_owned(), 1, 2)]);
        assert_eq!(request.employees, vec![EmployeeId(4)]);
        assert_eq!(request.aircraft, vec![AircraftId(0)]);
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert!(matches!(parse("dance"), Err(ParseError::Unknown(_))));
        assert!(matches!(parse("summary"), Err(ParseError::Missing { .. })));
        assert!(matches!(parse("advance soon"), Err(ParseError::Number(_))));
        assert!(matches!(
            parse("ship 0 1 item=medikit"),
            Err(ParseError::Part(_))
        ));
        assert_eq!(parse("transfers 2").unwrap(), ConsoleCommand::Transfers(Some(2)));
    }
}
