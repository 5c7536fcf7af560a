//! Line-oriented commands read by the `vending` binary.

use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  select <id>             choose a product
  insert <value>          insert a coin (200, 100, 50, 20 or 10)
  purchase                buy the selected product
  cancel                  return the inserted coins
  status                  show products, coins and the open transaction
  reset                   restore the configured load-out
  coins <value> <count>   set how many coins of one value the machine holds
  restock <id> <qty>      add stock to a product
  stock <id> <count>      set a product's stock, e.g. 0 to empty a slot
  scenario <name>         load a test setup: small-coins, out-of-stock, low-change
  help                    show this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Insert(u32),
    Purchase,
    Cancel,
    Status,
    Reset,
    Coins { value: u32, count: u32 },
    Restock { product_id: String, quantity: u32 },
    Stock { product_id: String, count: u32 },
    Scenario(Scenario),
    Help,
    Quit,
}

/// Canned machine states for trying out the refusal paths by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Only dollar coins left, so most purchases need exact change.
    SmallCoinShortage,
    /// Energy Drink (`B1`) emptied.
    OutOfStock,
    /// A single 50 in the reserve.
    ExtremeChangeShortage,
}

impl Scenario {
    /// Coin counts to install, by face value.
    pub fn coin_counts(self) -> Option<[(u32, u32); 5]> {
        match self {
            Scenario::SmallCoinShortage => Some([(200, 5), (100, 10), (50, 0), (20, 0), (10, 0)]),
            Scenario::ExtremeChangeShortage => Some([(200, 0), (100, 0), (50, 1), (20, 0), (10, 0)]),
            Scenario::OutOfStock => None,
        }
    }

    /// Product slot to empty.
    pub fn emptied_product(self) -> Option<&'static str> {
        match self {
            Scenario::OutOfStock => Some("B1"),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::SmallCoinShortage => "small-coins",
            Scenario::OutOfStock => "out-of-stock",
            Scenario::ExtremeChangeShortage => "low-change",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::SmallCoinShortage => {
                "Scenario: limited small coins for change. Try buying and getting change."
            }
            Scenario::OutOfStock => "Scenario: B1 out of stock. Select it and observe behavior.",
            Scenario::ExtremeChangeShortage => {
                "Scenario: very low change inventory. Try various purchases."
            }
        }
    }
}

impl FromStr for Scenario {
    type Err = CommandError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "small-coins" => Ok(Scenario::SmallCoinShortage),
            "out-of-stock" => Ok(Scenario::OutOfStock),
            "low-change" => Ok(Scenario::ExtremeChangeShortage),
            _ => Err(CommandError::Usage(
                "scenario small-coins|out-of-stock|low-change",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

fn number(word: &str) -> Result<u32, CommandError> {
    word.parse()
        .map_err(|_| CommandError::NotANumber(word.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        match (name.to_ascii_lowercase().as_str(), args) {
            ("select", [id]) => Ok(Command::Select(id.to_string())),
            ("select", _) => Err(CommandError::Usage("select <id>")),
            ("insert", [value]) => Ok(Command::Insert(number(value)?)),
            ("insert", _) => Err(CommandError::Usage("insert <value>")),
            ("purchase" | "buy", []) => Ok(Command::Purchase),
            ("cancel", []) => Ok(Command::Cancel),
            ("status", []) => Ok(Command::Status),
            ("reset", []) => Ok(Command::Reset),
            ("coins", [value, count]) => Ok(Command::Coins {
                value: number(value)?,
                count: number(count)?,
            }),
            ("coins", _) => Err(CommandError::Usage("coins <value> <count>")),
            ("restock", [id, quantity]) => Ok(Command::Restock {
                product_id: id.to_string(),
                quantity: number(quantity)?,
            }),
            ("restock", _) => Err(CommandError::Usage("restock <id> <qty>")),
            ("stock", [id, count]) => Ok(Command::Stock {
                product_id: id.to_string(),
                count: number(count)?,
            }),
            ("stock", _) => Err(CommandError::Usage("stock <id> <count>")),
            ("scenario", [name]) => Ok(Command::Scenario(name.parse()?)),
            ("scenario", _) => Err(CommandError::Usage(
                "scenario small-coins|out-of-stock|low-change",
            )),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            ("purchase" | "buy" | "cancel" | "status" | "reset" | "help" | "?" | "quit"
            | "exit", _) => Err(CommandError::Usage("command takes no arguments")),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_command() {
        assert_eq!("select A2".parse(), Ok(Command::Select("A2".into())));
        assert_eq!("insert 200".parse(), Ok(Command::Insert(200)));
        assert_eq!("purchase".parse(), Ok(Command::Purchase));
        assert_eq!("cancel".parse(), Ok(Command::Cancel));
        assert_eq!("status".parse(), Ok(Command::Status));
        assert_eq!("reset".parse(), Ok(Command::Reset));
        assert_eq!(
            "coins 50 12".parse(),
            Ok(Command::Coins {
                value: 50,
                count: 12
            })
        );
        assert_eq!(
            "restock B1 4".parse(),
            Ok(Command::Restock {
                product_id: "B1".into(),
                quantity: 4
            })
        );
        assert_eq!(
            "stock B1 0".parse(),
            Ok(Command::Stock {
                product_id: "B1".into(),
                count: 0
            })
        );
        assert_eq!(
            "scenario out-of-stock".parse(),
            Ok(Command::Scenario(Scenario::OutOfStock))
        );
        assert_eq!("help".parse(), Ok(Command::Help));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_scenarios_cover_every_denomination() {
        for scenario in [Scenario::SmallCoinShortage, Scenario::ExtremeChangeShortage] {
            let counts = scenario.coin_counts().unwrap();
            let values: Vec<u32> = counts.iter().map(|&(value, _)| value).collect();
            assert_eq!(values, vec![200, 100, 50, 20, 10]);
        }
        assert_eq!(Scenario::OutOfStock.emptied_product(), Some("B1"));
    }

    #[test]
    fn test_whitespace_and_case_are_ignored() {
        assert_eq!("  SELECT   a1 ".parse(), Ok(Command::Select("a1".into())));
    }

    #[test]
    fn test_rejections() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".into()))
        );
        assert_eq!(
            "insert".parse::<Command>(),
            Err(CommandError::Usage("insert <value>"))
        );
        assert_eq!(
            "insert 1.50".parse::<Command>(),
            Err(CommandError::NotANumber("1.50".into()))
        );
        assert!(matches!(
            "purchase now".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            "scenario flood".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(
            "stock B1 -1".parse::<Command>(),
            Err(CommandError::NotANumber("-1".into()))
        );
    }
}
