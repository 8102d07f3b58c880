//! JSON-lines request handling over stdio
//!
//! One request object per input line, one response object per output line.
//! The loop itself is async; every request is answered by synchronous calls
//! into the search core.

use anyhow::Result;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::recipes::{RecipeIndex, TagKind};
use crate::search::{tag_options, ActiveFilterSet, AutocompleteEngine, SearchEngine, TagOptions};
use crate::text::{json_kind, normalize_value};

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: String,
    pub message: String,
}

impl Response {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            id,
            result: None,
            error: Some(ResponseError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }

    fn from_app_error(id: Option<Value>, err: &AppError) -> Self {
        Self::error(id, err.error_code(), &err.message())
    }
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct SearchParams {
    /// Free text; fewer than the minimum number of characters means no text constraint
    query: Option<String>,
    filters: Option<ActiveFilterSet>,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct SuggestParams {
    query: String,
    /// Active tags, offered as suggestions too
    filters: Option<ActiveFilterSet>,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct NormalizeParams {
    text: String,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct RecipeParams {
    id: u32,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct TagsParams {
    query: Option<String>,
    filters: Option<ActiveFilterSet>,
    /// Restrict the answer to one dropdown
    kind: Option<TagKind>,
    /// Text typed into the dropdown's own search box
    input: Option<String>,
}

pub fn parse_request(json: &str) -> Result<Request> {
    let request: Request = serde_json::from_str(json)?;
    Ok(request)
}

pub fn serialize_response(response: &Response) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Answers requests against one index and configuration
pub struct RequestHandler<'a> {
    search: SearchEngine<'a>,
    autocomplete: AutocompleteEngine<'a>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(index: &'a RecipeIndex, config: &Config) -> Self {
        Self {
            search: SearchEngine::new(index).with_min_query_chars(config.min_query_chars),
            autocomplete: AutocompleteEngine::new(index)
                .with_min_query_chars(config.min_query_chars)
                .with_max_suggestions(config.max_suggestions),
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        let id = request.id.clone();
        if !(request.params.is_object() || request.params.is_null()) {
            return Response::error(id, "invalid_input", "params must be an object");
        }

        let result = match request.method.as_str() {
            "search" => Ok(self.handle_search(&request.params)),
            "suggest" => Ok(self.handle_suggest(&request.params)),
            "normalize" => self.handle_normalize(&request.params),
            "recipe" => self.handle_recipe(&request.params),
            "tags" => self.handle_tags(&request.params),
            "methods/list" => Ok(methods_list()),
            other => {
                return Response::error(id, "method_not_found", &format!("Unknown method: {}", other));
            }
        };

        match result {
            Ok(value) => Response::success(id, value),
            Err(e) => Response::from_app_error(id, &e),
        }
    }

    fn handle_search(&self, params: &Value) -> Value {
        let results = self.search.search_value(param(params, "query"), param(params, "filters"));
        let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
        json!({
            "count": results.len(),
            "ids": ids,
            "recipes": results,
        })
    }

    fn handle_suggest(&self, params: &Value) -> Value {
        let suggestions = match (param(params, "query"), ActiveFilterSet::from_value(param(params, "filters"))) {
            (Value::String(query), Ok(filters)) => self.autocomplete.suggest_with_tags(query, &filters),
            (other, Ok(_)) => {
                warn!("Rejected suggest query of type {}", json_kind(other));
                Vec::new()
            }
            (_, Err(e)) => {
                warn!("Rejected suggest request: {}", e);
                Vec::new()
            }
        };
        json!({ "suggestions": suggestions })
    }

    fn handle_normalize(&self, params: &Value) -> Result<Value, AppError> {
        let text = normalize_value(param(params, "text"))?;
        Ok(json!({ "text": text }))
    }

    fn handle_recipe(&self, params: &Value) -> Result<Value, AppError> {
        let id = param(params, "id")
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| AppError::InvalidInput("id must be a non-negative integer".to_string()))?;
        let recipe = self.search.index().get_by_id(id)?;
        Ok(serde_json::to_value(recipe)?)
    }

    fn handle_tags(&self, params: &Value) -> Result<Value, AppError> {
        let kind = match param(params, "kind") {
            Value::Null => None,
            Value::String(s) => Some(s.parse::<TagKind>()?),
            other => {
                return Err(AppError::InvalidInput(format!(
                    "kind must be a string, got {}",
                    json_kind(other)
                )))
            }
        };

        let options = match ActiveFilterSet::from_value(param(params, "filters")) {
            Ok(filters) => {
                let results = self.search.search_value(param(params, "query"), param(params, "filters"));
                tag_options(&results, &filters)
            }
            Err(e) => {
                warn!("Rejected tags request: {}", e);
                TagOptions::default()
            }
        };

        let options = match param(params, "input") {
            Value::String(input) => options.narrowed(input),
            _ => options,
        };

        Ok(match kind {
            Some(kind) => json!({ kind.group_name(): options.get(kind) }),
            None => serde_json::to_value(&options)?,
        })
    }
}

static NULL: Value = Value::Null;

/// Named parameter, `null` when absent
fn param<'v>(params: &'v Value, name: &str) -> &'v Value {
    params.get(name).unwrap_or(&NULL)
}

fn methods_list() -> Value {
    json!({
        "methods": [
            {
                "name": "search",
                "description": "Recipes matching a free-text query and active tags, in collection order",
                "params": schema_for!(SearchParams),
            },
            {
                "name": "suggest",
                "description": "Up to the configured number of autocomplete suggestions for a partial query",
                "params": schema_for!(SuggestParams),
            },
            {
                "name": "normalize",
                "description": "Comparison form of a string: trimmed, lowercased, accents removed",
                "params": schema_for!(NormalizeParams),
            },
            {
                "name": "recipe",
                "description": "One recipe by id",
                "params": schema_for!(RecipeParams),
            },
            {
                "name": "tags",
                "description": "Ingredient, appliance and utensil options for the current results",
                "params": schema_for!(TagsParams),
            },
        ]
    })
}

/// Serve requests from stdin until it closes
pub async fn handle_stdio(index: &RecipeIndex, config: &Config) -> Result<()> {
    info!("Serving {} recipes on stdio", index.len());

    let handler = RequestHandler::new(index, config);
    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = reader.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handler.handle(request),
            Err(e) => {
                error!("Failed to parse request: {}", e);
                Response::error(None, "parse_error", &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}
