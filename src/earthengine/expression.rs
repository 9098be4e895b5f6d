//! Serializable Earth Engine expression graphs.
//!
//! The REST API accepts computations as an `Expression`: a map of named
//! value nodes plus the name of the node holding the result. Every graph
//! built here has a single root node named `"0"`; sub-computations are
//! nested inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the root node in every expression produced by this crate.
pub const ROOT_NODE: &str = "0";

/// A single node in an expression graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueNode {
    /// A JSON literal (number, string, list of literals, ...).
    ConstantValue(serde_json::Value),
    /// A call to a server-side algorithm.
    FunctionInvocationValue(FunctionInvocation),
}

/// Invocation of a named server-side algorithm with keyword arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInvocation {
    /// Algorithm name, e.g. `"Image.clip"`.
    pub function_name: String,
    /// Keyword arguments. Ordered so serialized graphs are stable.
    pub arguments: BTreeMap<String, ValueNode>,
}

impl ValueNode {
    /// Wraps a JSON literal.
    pub fn constant(value: impl Into<serde_json::Value>) -> Self {
        Self::ConstantValue(value.into())
    }

    /// Builds a function invocation from `(argument, node)` pairs.
    pub fn invoke<'a>(
        function_name: &str,
        arguments: impl IntoIterator<Item = (&'a str, ValueNode)>,
    ) -> Self {
        Self::FunctionInvocationValue(FunctionInvocation {
            function_name: function_name.to_string(),
            arguments: arguments
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        })
    }

    /// Returns the algorithm name when this node is an invocation.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::FunctionInvocationValue(call) => Some(&call.function_name),
            Self::ConstantValue(_) => None,
        }
    }

    /// Returns the named argument when this node is an invocation.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ValueNode> {
        match self {
            Self::FunctionInvocationValue(call) => call.arguments.get(name),
            Self::ConstantValue(_) => None,
        }
    }

    /// Returns the literal when this node is a constant.
    #[must_use]
    pub fn as_constant(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ConstantValue(value) => Some(value),
            Self::FunctionInvocationValue(_) => None,
        }
    }
}

/// A complete expression as sent in REST request bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// Named value nodes.
    pub values: BTreeMap<String, ValueNode>,
    /// Name of the node whose value is the result.
    pub result: String,
}

impl Expression {
    /// Wraps a root node into a single-node expression.
    #[must_use]
    pub fn new(root: ValueNode) -> Self {
        let mut values = BTreeMap::new();
        values.insert(ROOT_NODE.to_string(), root);
        Self {
            values,
            result: ROOT_NODE.to_string(),
        }
    }

    /// Returns the node holding the result, if present.
    #[must_use]
    pub fn root(&self) -> Option<&ValueNode> {
        self.values.get(&self.result)
    }
}
