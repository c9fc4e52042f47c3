//! Pokemon Campaign MCP Server
//!
//! A Model Context Protocol server (rmcp, stdio transport) that exposes one
//! quick-battle session as tools, so an assistant can run the dice and
//! damage bookkeeping during a tabletop game.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use clap::Parser;
use pokemon_campaign::config::CliArgs;
use pokemon_campaign::interface::{parse_side, BattleSession, VALUE_FIELDS};
use pokemon_campaign::logging::init_tracing;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use schema::{Side, TypeName};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PokemonCampaignService {
    tool_router: ToolRouter<PokemonCampaignService>,
    session: Arc<Mutex<BattleSession>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SideRequest {
    #[schemars(description = "Which side: 'a' for the attacker, 'd' for the defender")]
    pub side: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectPokemonRequest {
    #[schemars(description = "Which side: 'a' for the attacker, 'd' for the defender")]
    pub side: String,
    #[schemars(description = "Roster number as shown by list_roster (starting at 1)")]
    pub roster_number: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetValueRequest {
    #[schemars(description = "Which side: 'a' for the attacker, 'd' for the defender")]
    pub side: String,
    #[schemars(description = "Field to set: 'stat', 'hp', 'dice' or 'bonus'")]
    pub field: String,
    #[schemars(description = "New value; anything that is not a number counts as 0")]
    pub value: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetTypesRequest {
    #[schemars(description = "Which side: 'a' for the attacker, 'd' for the defender")]
    pub side: String,
    #[schemars(description = "Up to two type names, e.g. [\"火\", \"飞行\"]; empty clears them")]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ModeRequest {
    #[schemars(description = "Dice mode ('manual', 'd6', 'd4') or attack mode ('physical', 'special')")]
    pub mode: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CommandRequest {
    #[schemars(description = "A companion command line, e.g. 'roll a' or 'status'")]
    pub command: String,
}

#[tool_router]
impl PokemonCampaignService {
    pub fn new(session: BattleSession) -> Self {
        Self {
            tool_router: Self::tool_router(),
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn with_session(
        &self,
        action: impl FnOnce(&mut BattleSession) -> String,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().map_err(|e| McpError {
            code: ErrorCode(-32603),
            message: Cow::from(format!("Battle session unavailable: {}", e)),
            data: None,
        })?;
        let text = action(&mut session);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn run(&self, command: &str) -> Result<CallToolResult, McpError> {
        debug!(command, "tool command");
        self.with_session(|session| session.handle_command(command))
    }

    #[tool(description = "Show both combatants, the type bonus and the totals")]
    async fn get_status(&self) -> Result<CallToolResult, McpError> {
        self.run("status")
    }

    #[tool(description = "Show the battle log, newest entry first")]
    async fn get_log(&self) -> Result<CallToolResult, McpError> {
        self.run("log")
    }

    #[tool(description = "List the type names the chart knows")]
    async fn list_types(&self) -> Result<CallToolResult, McpError> {
        self.run("types")
    }

    #[tool(description = "List the saved Pokemon roster")]
    async fn list_roster(&self) -> Result<CallToolResult, McpError> {
        self.run("roster")
    }

    #[tool(description = "Fill a side from a saved Pokemon: name, types, HP and base stat")]
    async fn select_pokemon(
        &self,
        Parameters(request): Parameters<SelectPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&format!("select {} {}", request.side, request.roster_number))
    }

    #[tool(description = "Set a side's base stat, HP, dice roll or extra bonus")]
    async fn set_value(
        &self,
        Parameters(request): Parameters<SetValueRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(side) = parse_side(&request.side) else {
            return Err(bad_side(&request.side));
        };
        if !VALUE_FIELDS.contains(&request.field.to_lowercase().as_str()) {
            return Err(invalid_params(format!(
                "Unknown field '{}'; expected one of {}",
                request.field,
                VALUE_FIELDS.join(", ")
            )));
        }
        debug!(field = %request.field, ?side, "set value");
        self.with_session(|session| session.set_value(&request.field, side, &request.value))
    }

    #[tool(description = "Set a side's types and recompute the type bonus")]
    async fn set_types(
        &self,
        Parameters(request): Parameters<SetTypesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(side) = parse_side(&request.side) else {
            return Err(bad_side(&request.side));
        };
        let types: Vec<TypeName> = request.types.into_iter().map(TypeName::from).collect();
        debug!(?side, count = types.len(), "set types");
        self.with_session(|session| session.apply_types(side, types))
    }

    #[tool(description = "Choose how dice are rolled: manual, d6 or d4")]
    async fn set_dice_mode(
        &self,
        Parameters(request): Parameters<ModeRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&format!("mode {}", request.mode))
    }

    #[tool(description = "Choose whether the attacker uses physical or special attack")]
    async fn set_attack_mode(
        &self,
        Parameters(request): Parameters<ModeRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&format!("attack {}", request.mode))
    }

    #[tool(description = "Roll the die for one side (not available in manual mode)")]
    async fn roll_dice(
        &self,
        Parameters(request): Parameters<SideRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&format!("roll {}", request.side))
    }

    #[tool(description = "Compare totals and apply damage or reflect damage")]
    async fn resolve_damage(&self) -> Result<CallToolResult, McpError> {
        self.run("resolve")
    }

    #[tool(description = "Clear dice and bonuses for a new round; HP is kept")]
    async fn reset_round(&self) -> Result<CallToolResult, McpError> {
        self.run("reset")
    }

    #[tool(description = "Reset the round and mark the round boundary in the log")]
    async fn next_round(&self) -> Result<CallToolResult, McpError> {
        self.run("next")
    }

    #[tool(description = "Exchange the attacker and the defender")]
    async fn swap_sides(&self) -> Result<CallToolResult, McpError> {
        self.run("swap")
    }

    #[tool(description = "Clear the battle log")]
    async fn clear_log(&self) -> Result<CallToolResult, McpError> {
        self.run("clear")
    }

    #[tool(description = "Run any companion command line; 'help' lists them")]
    async fn run_command(
        &self,
        Parameters(request): Parameters<CommandRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(&request.command)
    }
}

fn invalid_params(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32602),
        message: Cow::from(message),
        data: None,
    }
}

fn bad_side(side: &str) -> McpError {
    invalid_params(format!(
        "Unknown side '{}'; use 'a' ({}) or 'd' ({})",
        side,
        Side::Attacker,
        Side::Defender
    ))
}

#[tool_handler]
impl ServerHandler for PokemonCampaignService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = args.resolve()?;
    let session = BattleSession::from_config(&config)?;
    info!("Pokemon Campaign MCP server starting");

    let service = PokemonCampaignService::new(session);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    info!(?quit_reason, "Pokemon Campaign MCP server exiting");
    Ok(())
}
