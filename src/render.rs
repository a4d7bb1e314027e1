use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::model::FunctionDescriptor;
use crate::parser::text::pretty_title;

/// Fixed header: diagnostic switches, the module table, record classes the
/// annotations refer to, and the gRPC-style error enum with its HTTP
/// equivalents. Everything here is hand-maintained, not scraped.
pub const PRELUDE: &str = r#"---@diagnostic disable: undefined-doc-param, missing-return
local M = {}

---@class Account
---@field public metadata table
---@field public wallet table
---@field public username string
---@field public display_name string
---@field public timezone string
---@field public location string
---@field public language string
---@field public avatar_url string
M.account = {}

---@class CollectionObject
---@field public collection string
---@field public key string
---@field public user_id string
---@field public value table
---@field public version string
---@field public permission_read number
---@field public permission_write number
M.collection_object = {}

---@class Context
---@field env table A table of key/value pairs which are defined in the YAML configuration of the server. This is useful to store API keys and other secrets which may be different between servers run in production and in development.
---@field execution_mode string The mode associated with the execution context. It's one of these values: "run_once", "rpc", "before", "after", "match", "matchmaker", "leaderboard_reset", "tournament_reset", "tournament_end".
---@field query_params table Query params that was passed through from HTTP request.
---@field session_id string The user session associated with the execution context.
---@field user_id string The user ID associated with the execution context.
---@field username string The username associated with the execution context.
---@field user_session_exp number The user session expiry in seconds associated with the execution context.
---@field client_ip string The IP address of the client making the request.
---@field client_port string The port number of the client making the request.
---@field match_id string The match ID that is currently being executed. Only applicable to server authoritative multiplayer.
---@field match_node string The node ID that the match is being executed on. Only applicable to server authoritative multiplayer.
---@field match_label string Labels associated with the match. Only applicable to server authoritative multiplayer.
---@field match_tick_rate number Tick rate defined for this match. Only applicable to server authoritative multiplayer.
M.context = {}

---@class Presence
---@field user_id string
---@field session_id string
---@field username string
---@field node string
M.presence = {}

---@class GameMessage
---@field sender Presence
---@field op_code number
---@field data string
M.game_message = {}

---@class Dispatcher
M.dispatcher = {}

---@enum error
M.error = {
    OK                  = 0, -- HTTP 200
    CANCELED            = 1, -- HTTP 499
    UNKNOWN             = 2, -- HTTP 500
    INVALID_ARGUMENT    = 3, -- HTTP 400
    DEADLINE_EXCEEDED   = 4, -- HTTP 504
    NOT_FOUND           = 5, -- HTTP 404
    ALREADY_EXISTS      = 6, -- HTTP 409
    PERMISSION_DENIED   = 7, -- HTTP 403
    RESOURCE_EXHAUSTED  = 8, -- HTTP 429
    FAILED_PRECONDITION = 9, -- HTTP 400
    ABORTED             = 10, -- HTTP 409
    OUT_OF_RANGE        = 11, -- HTTP 400
    UNIMPLEMENTED       = 12, -- HTTP 501
    INTERNAL            = 13, -- HTTP 500
    UNAVAILABLE         = 14, -- HTTP 503
    DATA_LOSS           = 15, -- HTTP 500
    UNAUTHENTICATED     = 16 -- HTTP 401
}

"#;

const FOOTER: &str = "return M\n";

/// Render the complete stub file: prelude, one block per function in
/// extraction order, closing export line.
pub fn render_stubs(functions: &[FunctionDescriptor]) -> String {
    let mut out = String::from(PRELUDE);
    for f in functions {
        push_function(&mut out, f);
    }
    out.push_str(FOOTER);
    out
}

fn push_function(out: &mut String, f: &FunctionDescriptor) {
    match &f.description {
        Some(desc) => out.push_str(&format!("--- {desc}\n")),
        None => out.push_str(&format!("--- {}\n", pretty_title(&f.title))),
    }

    for p in &f.parameters {
        if p.required {
            out.push_str(&format!(
                "---@param {} {} REQUIRED - {}\n",
                p.name, p.ty, p.description
            ));
        } else {
            out.push_str(&format!("---@param {}? {} {}\n", p.name, p.ty, p.description));
        }
    }

    for r in &f.returns {
        let name = if r.name.is_empty() { "result" } else { r.name.as_str() };
        out.push_str(&format!("---@return {} {} {}\n", r.ty, name, r.description));
    }

    let args = f
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("function M.{}({})\nend\n\n", f.name, args));
}

/// Overwrite `path` with the rendered stubs, creating parent directories
/// first so the default ./modules/ destination works on a fresh checkout.
pub fn write_stubs(path: &Path, functions: &[FunctionDescriptor]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, render_stubs(functions))
        .with_context(|| format!("failed to write {}", path.display()))
}

// ── Tests ──
