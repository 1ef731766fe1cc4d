//! Endpoint rule extraction from an OpenAPI description.
//!
//! Every operation under a path whose template contains the `attrs` marker
//! followed by another segment becomes one [`EndpointRule`]. The segment after
//! the marker is the attribute the operation reads or writes. Paths without
//! such a segment are excluded and listed in [`Extraction::rejected`].
//!
//! No schema validation is performed: fields that are missing or of an
//! unexpected JSON type are treated as absent.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::MapperError;

/// Path segment that precedes the attribute name.
pub const ATTRIBUTE_MARKER: &str = "attrs";

/// Name of the parameter whose default carries the target entity type.
pub const ENTITY_TYPE_PARAMETER: &str = "type";

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// Parses an OpenAPI path-item key. Returns `None` for keys that are not
    /// operations, such as `parameters` or `summary`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    /// Upper-case method token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    /// Query string.
    Query,
    /// Path template variable.
    Path,
    /// Request header.
    Header,
}

impl ParameterLocation {
    fn from_in(value: &str) -> Option<Self> {
        match value {
            "query" => Some(ParameterLocation::Query),
            "path" => Some(ParameterLocation::Path),
            "header" => Some(ParameterLocation::Header),
            _ => None,
        }
    }
}

/// A header an operation sends, with its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDefault {
    /// Header field name, e.g. `Fiware-Service`.
    pub name: String,
    /// Default value from the parameter schema, empty if none.
    pub default_value: String,
}

/// A query or path parameter, with its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefault {
    /// Parameter name.
    pub name: String,
    /// Query or path.
    pub location: ParameterLocation,
    /// Default value from the parameter schema, empty if none.
    pub default_value: String,
}

/// One HTTP operation that reads or writes a device attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRule {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template as declared, e.g. `/v2/entities/{id}/attrs/temperature/value`.
    pub path_template: String,
    /// Entity type from the `type` parameter's default, if any.
    pub target_entity_type: Option<String>,
    /// Segment following the `attrs` marker. Never empty.
    pub attribute_name: String,
    /// Header parameters in declaration order. Duplicates are kept.
    pub headers: Vec<HeaderDefault>,
    /// Query and path parameters in declaration order.
    pub parameters: Vec<ParameterDefault>,
}

impl EndpointRule {
    /// The URI a request for `device_id` targets:
    /// `{base_url}{device_id}/attrs/{attribute}/value`.
    #[must_use]
    pub fn request_target(&self, base_url: &str, device_id: &str) -> String {
        format!(
            "{base_url}{device_id}/{ATTRIBUTE_MARKER}/{}/value",
            self.attribute_name
        )
    }
}

/// Result of extracting rules from one API description.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Accepted rules in declaration order.
    pub rules: Vec<EndpointRule>,
    /// Path templates excluded for lack of an attribute segment.
    pub rejected: Vec<String>,
}

impl Extraction {
    /// The first rule targeting `entity_type`.
    #[must_use]
    pub fn find(&self, entity_type: &str) -> Option<&EndpointRule> {
        find_rule(&self.rules, entity_type)
    }
}

/// The first rule in `rules` whose target entity type is `entity_type`.
#[must_use]
pub fn find_rule<'a>(rules: &'a [EndpointRule], entity_type: &str) -> Option<&'a EndpointRule> {
    rules
        .iter()
        .find(|r| r.target_entity_type.as_deref() == Some(entity_type))
}

/// Extracts endpoint rules from a parsed OpenAPI document.
#[must_use]
pub fn extract_rules(description: &Value) -> Extraction {
    let mut extraction = Extraction::default();
    let Some(paths) = description.get("paths").and_then(Value::as_object) else {
        return extraction;
    };

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        let Some(attribute) = attribute_from_path(path) else {
            tracing::debug!(path = %path, "no attribute segment, path excluded");
            extraction.rejected.push(path.clone());
            continue;
        };
        let shared = item.get("parameters").map(parameter_list).unwrap_or_default();

        for (key, operation) in item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let own = operation
                .get("parameters")
                .map(parameter_list)
                .unwrap_or_default();
            extraction.rules.push(build_rule(
                method,
                path,
                attribute,
                merge_parameters(&shared, own),
            ));
        }
    }

    tracing::debug!(
        rules = extraction.rules.len(),
        rejected = extraction.rejected.len(),
        "extracted endpoint rules"
    );
    extraction
}

/// Parses `text` as an OpenAPI JSON document and extracts its rules.
///
/// # Errors
///
/// Returns [`MapperError::Json`] if `text` is not valid JSON.
pub fn extract_rules_from_str(text: &str, origin: &str) -> Result<Extraction, MapperError> {
    let description: Value = serde_json::from_str(text).map_err(|source| MapperError::Json {
        path: origin.to_owned(),
        source,
    })?;
    Ok(extract_rules(&description))
}

/// Reads an OpenAPI JSON file and extracts its rules.
///
/// # Errors
///
/// Returns [`MapperError::Io`] if the file cannot be read and
/// [`MapperError::Json`] if it is not valid JSON.
pub fn extract_rules_from_file(path: &Path) -> Result<Extraction, MapperError> {
    let text = std::fs::read_to_string(path).map_err(|source| MapperError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_rules_from_str(&text, &path.display().to_string())
}

/// The segment after [`ATTRIBUTE_MARKER`], if present and non-empty.
fn attribute_from_path(path: &str) -> Option<&str> {
    let mut segments = path.trim_matches('/').split('/');
    segments.find(|s| *s == ATTRIBUTE_MARKER)?;
    segments.next().filter(|s| !s.is_empty())
}

/// A raw parameter object, reduced to the fields extraction needs.
#[derive(Debug, Clone)]
struct RawParameter {
    name: String,
    location: Option<ParameterLocation>,
    default: Option<String>,
}

fn parameter_list(value: &Value) -> Vec<RawParameter> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| {
                    let name = p.get("name")?.as_str()?.to_owned();
                    let location = p
                        .get("in")
                        .and_then(Value::as_str)
                        .and_then(ParameterLocation::from_in);
                    let default = p
                        .get("schema")
                        .and_then(|s| s.get("default"))
                        .and_then(render_default);
                    Some(RawParameter {
                        name,
                        location,
                        default,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Path-level parameters first, minus any the operation redeclares with the
/// same name and location, followed by the operation's own.
fn merge_parameters(shared: &[RawParameter], own: Vec<RawParameter>) -> Vec<RawParameter> {
    let mut merged: Vec<RawParameter> = shared
        .iter()
        .filter(|s| {
            !own.iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

fn render_default(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn build_rule(
    method: HttpMethod,
    path: &str,
    attribute: &str,
    parameters: Vec<RawParameter>,
) -> EndpointRule {
    let mut rule = EndpointRule {
        method,
        path_template: path.to_owned(),
        target_entity_type: None,
        attribute_name: attribute.to_owned(),
        headers: Vec::new(),
        parameters: Vec::new(),
    };

    for param in parameters {
        if param.name == ENTITY_TYPE_PARAMETER {
            rule.target_entity_type = param.default.clone();
        }
        let default_value = param.default.unwrap_or_default();
        match param.location {
            Some(ParameterLocation::Header) => rule.headers.push(HeaderDefault {
                name: param.name,
                default_value,
            }),
            Some(location) => rule.parameters.push(ParameterDefault {
                name: param.name,
                location,
                default_value,
            }),
            None => {}
        }
    }
    rule
}
