//! One operator console attached to one hosted machine.

use crate::client::MachineClient;
use crate::command::{Command, CommandError, Scenario, HELP};
use crate::error::ServiceError;
use crate::model::MachineId;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;
use vending_core::{format_currency, MachineConfig};

/// What a command produced, both as a screen message and as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub message: String,
    pub data: Value,
}

impl Reply {
    fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    pub fn render(&self, json: bool) -> String {
        if json {
            self.data.to_string()
        } else {
            self.message.clone()
        }
    }
}

pub struct Session {
    client: MachineClient,
    id: MachineId,
    /// Load-out restored by `reset`.
    config: MachineConfig,
}

impl Session {
    pub fn new(client: MachineClient, id: MachineId, config: MachineConfig) -> Self {
        Self { client, id, config }
    }

    /// Runs everything except `quit`, which the caller handles.
    pub async fn execute(&self, command: Command) -> Result<Reply, ServiceError> {
        let id = self.id;
        let reply = match command {
            Command::Select(product_id) => {
                let selection = self.client.select_product(id, &product_id).await?;
                Reply::new(selection.to_string(), json!(selection))
            }
            Command::Insert(value) => {
                let total = self.client.insert_coin(id, value).await?;
                Reply::new(
                    format!(
                        "Inserted {}. Total: {}",
                        format_currency(value),
                        format_currency(total)
                    ),
                    json!({ "inserted": value, "totalInserted": total }),
                )
            }
            Command::Purchase => {
                let outcome = self.client.purchase(id).await?;
                Reply::new(outcome.to_string(), json!(outcome))
            }
            Command::Cancel => {
                let refund = self.client.cancel(id).await?;
                Reply::new(refund.to_string(), json!(refund))
            }
            Command::Status => {
                let status = self.client.status(id).await?;
                Reply::new(status.to_string(), json!(status))
            }
            Command::Reset => {
                self.client.reset(id, self.config.clone()).await?;
                Reply::new("Machine reset.", json!({ "reset": true }))
            }
            Command::Coins { value, count } => {
                self.client.set_coin_count(id, value, count).await?;
                Reply::new(
                    format!("Now holding {count} x {}", format_currency(value)),
                    json!({ "denomination": value, "count": count }),
                )
            }
            Command::Restock {
                product_id,
                quantity,
            } => {
                let stock = self.client.restock(id, &product_id, quantity).await?;
                Reply::new(
                    format!("{product_id} now has {stock} in stock"),
                    json!({ "productId": product_id, "stock": stock }),
                )
            }
            Command::Stock { product_id, count } => {
                let stock = self.client.set_stock(id, &product_id, count).await?;
                Reply::new(
                    format!("{product_id} now has {stock} in stock"),
                    json!({ "productId": product_id, "stock": stock }),
                )
            }
            Command::Scenario(scenario) => {
                self.load_scenario(scenario).await?;
                Reply::new(
                    scenario.description(),
                    json!({ "scenario": scenario.name() }),
                )
            }
            Command::Help => Reply::new(HELP, json!({ "help": HELP })),
            Command::Quit => Reply::new("Bye.", json!({ "quit": true })),
        };
        Ok(reply)
    }

    async fn load_scenario(&self, scenario: Scenario) -> Result<(), ServiceError> {
        if let Some(counts) = scenario.coin_counts() {
            for (value, count) in counts {
                self.client.set_coin_count(self.id, value, count).await?;
            }
        }
        if let Some(product_id) = scenario.emptied_product() {
            self.client.set_stock(self.id, product_id, 0).await?;
        }
        Ok(())
    }

    /// Reads commands line by line until `quit` or end of input, writing one reply per
    /// command. Blank lines are skipped.
    pub async fn run_console<R, W>(
        &self,
        input: R,
        output: &mut W,
        json: bool,
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    warn!(error = %e, "Rejected input");
                    write_line(output, &render_input_error(&e, json)).await?;
                    continue;
                }
            };
            let quit = command == Command::Quit;

            let text = match self.execute(command).await {
                Ok(reply) => reply.render(json),
                Err(e) => render_error(&e, json),
            };
            write_line(output, &text).await?;
            if quit {
                break;
            }
        }
        Ok(())
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

/// Renders a line that did not parse as a command.
pub fn render_input_error(error: &CommandError, json: bool) -> String {
    if json {
        json!({ "error": "InvalidCommand", "message": error.to_string() }).to_string()
    } else {
        format!("Error: {error}")
    }
}

/// Renders a refused command for the console.
pub fn render_error(error: &ServiceError, json: bool) -> String {
    if !json {
        return format!("Error: {error}");
    }
    let kind = match error.vending() {
        Some(e) => json!(e.kind()),
        None => json!("Service"),
    };
    json!({ "error": kind, "message": error.to_string() }).to_string()
}
