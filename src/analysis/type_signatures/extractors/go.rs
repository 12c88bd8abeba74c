//! Go Signature Extraction
//!
//! Builds [`GoSignature`] values from tree-sitter-go syntax trees. Instruction
//! text is often not a valid compilation unit, so parsing runs an ordered
//! chain of attempts and returns the first success:
//! 1. The text as a Go file holding exactly one function declaration
//! 2. A signature fragment found in the text, wrapped as a called func literal
//! 3. The raw text as a function type, e.g. `func(a int) bool`
//! 4. The raw text as an expression

use crate::analysis::type_signatures::analyzer::{GoParam, GoSignature, SignatureError};
use crate::analysis::type_signatures::normalizer::{ChanDir, GoType};
use crate::analysis::type_signatures::patterns::{find_signature_fragment, has_package_clause};
use std::ops::Range;
use tracing::trace;
use tree_sitter::{Node, Parser, Tree};

type Attempt = fn(&str) -> Result<GoSignature, SignatureError>;

/// Parse a Go function signature out of `source`.
pub fn parse_signature(source: &str) -> Result<GoSignature, SignatureError> {
    // The expression attempt runs last so that its `Invalid` verdict on a
    // well-formed non-function expression is the error reported.
    let attempts: [(&str, Attempt); 4] = [
        ("declaration", parse_declaration),
        ("fragment", parse_fragment),
        ("function type", parse_function_type),
        ("expression", parse_expression),
    ];

    let mut last_error = SignatureError::parse("empty signature source");
    for (label, attempt) in attempts {
        match attempt(source) {
            Ok(signature) => return Ok(signature),
            Err(e) => {
                trace!(attempt = label, error = %e, "signature parse attempt failed");
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// Go source wrapped around user text. `user` is the byte range of that
/// text inside `code`; errors are reported relative to it.
struct Synthetic {
    code: String,
    user: Range<usize>,
}

impl Synthetic {
    fn wrap(prefix: &str, text: &str, suffix: &str) -> Self {
        Self {
            code: format!("{prefix}{text}{suffix}"),
            user: prefix.len()..prefix.len() + text.len(),
        }
    }

    fn file(source: &str) -> Self {
        if has_package_clause(source) {
            Self::wrap("", source, "")
        } else {
            Self::wrap("package p\n", source, "")
        }
    }

    fn expression(expr: &str) -> Self {
        Self::wrap("package p\nvar _ = ", expr, "\n")
    }

    fn type_spec(ty: &str) -> Self {
        Self::wrap("package p\ntype signature ", ty, "\n")
    }

    fn parse(&self) -> Result<Tree, SignatureError> {
        let tree = parse_go(&self.code)?;
        match first_syntax_error(tree.root_node(), &self.code, &self.user) {
            Some(message) => Err(SignatureError::parse(message)),
            None => Ok(tree),
        }
    }
}

fn parse_go(code: &str) -> Result<Tree, SignatureError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| SignatureError::parse(format!("failed to load Go grammar: {e}")))?;
    parser
        .parse(code, None)
        .ok_or_else(|| SignatureError::parse("parser produced no syntax tree"))
}

fn parse_declaration(source: &str) -> Result<GoSignature, SignatureError> {
    let synthetic = Synthetic::file(source);
    let tree = synthetic.parse()?;
    let root = tree.root_node();
    let code = synthetic.code.as_str();

    let mut cursor = root.walk();
    let declarations: Vec<Node> = root
        .named_children(&mut cursor)
        .filter(|n| matches!(n.kind(), "function_declaration" | "method_declaration"))
        .collect();

    match declarations.as_slice() {
        [declaration] => Ok(signature_from_declaration(*declaration, code)),
        [] => Err(SignatureError::parse("no function declaration found")),
        many => Err(SignatureError::parse(format!(
            "expected one function declaration, found {}",
            many.len()
        ))),
    }
}

fn parse_fragment(source: &str) -> Result<GoSignature, SignatureError> {
    let fragment = find_signature_fragment(source)
        .ok_or_else(|| SignatureError::parse("no function signature found"))?;

    let literal = if fragment.result.is_empty() {
        format!("func({}) {{}}()", fragment.params)
    } else {
        format!("func({}) {} {{}}()", fragment.params, fragment.result)
    };

    let mut signature = parse_expression(&literal)?;
    signature.name = Some(fragment.name);
    Ok(signature)
}

fn parse_expression(source: &str) -> Result<GoSignature, SignatureError> {
    let synthetic = Synthetic::expression(source.trim());
    let tree = synthetic.parse()?;
    let code = synthetic.code.as_str();

    let expression = initializer_expression(tree.root_node())
        .ok_or_else(|| SignatureError::parse("no expression found"))?;

    let literal = match expression.kind() {
        "func_literal" => Some(expression),
        "call_expression" => expression
            .child_by_field_name("function")
            .filter(|callee| callee.kind() == "func_literal"),
        _ => None,
    };

    literal
        .map(|literal| signature_from_function_node(literal, None, None, code))
        .ok_or(SignatureError::Invalid)
}

fn parse_function_type(source: &str) -> Result<GoSignature, SignatureError> {
    let synthetic = Synthetic::type_spec(source.trim());
    let tree = synthetic.parse()?;
    let code = synthetic.code.as_str();

    let root = tree.root_node();
    let mut cursor = root.walk();
    let declaration = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "type_declaration")
        .ok_or_else(|| SignatureError::parse("no type found"))?;

    let mut cursor = declaration.walk();
    let ty = declaration
        .named_children(&mut cursor)
        .find(|n| n.kind() == "type_spec")
        .and_then(|spec| spec.child_by_field_name("type"))
        .ok_or_else(|| SignatureError::parse("no type found"))?;

    if ty.kind() == "function_type" {
        Ok(signature_from_function_node(ty, None, None, code))
    } else {
        Err(SignatureError::Invalid)
    }
}

/// The value of `var _ = <expr>` in a synthetic file.
fn initializer_expression(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    let declaration = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "var_declaration")?;

    let mut cursor = declaration.walk();
    let spec = declaration
        .named_children(&mut cursor)
        .find(|n| n.kind() == "var_spec")?;

    let values = spec.child_by_field_name("value")?;
    values.named_child(0)
}

fn signature_from_declaration(node: Node, code: &str) -> GoSignature {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, code).to_string());
    let receiver = node
        .child_by_field_name("receiver")
        .and_then(|list| convert_params(list, code).into_iter().next());
    let mut signature = signature_from_function_node(node, name, receiver, code);
    if let Some(list) = node.child_by_field_name("type_parameters") {
        signature.type_params = convert_type_params(list, code);
    }
    signature
}

/// Shared by declarations, function literals and function types: all carry
/// `parameters` and an optional `result` field.
fn signature_from_function_node(
    node: Node,
    name: Option<String>,
    receiver: Option<GoParam>,
    code: &str,
) -> GoSignature {
    let params = node
        .child_by_field_name("parameters")
        .map(|list| convert_params(list, code))
        .unwrap_or_default();

    let results = match node.child_by_field_name("result") {
        Some(list) if list.kind() == "parameter_list" => convert_params(list, code),
        Some(ty) => vec![GoParam {
            names: Vec::new(),
            ty: convert_type(ty, code),
        }],
        None => Vec::new(),
    };

    GoSignature {
        receiver,
        name,
        type_params: Vec::new(),
        params,
        results,
    }
}

fn convert_type_params(list: Node, code: &str) -> Vec<GoParam> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|decl| decl.kind() == "type_parameter_declaration")
        .map(|decl| GoParam {
            names: field_names(decl, code),
            ty: field_type(decl, "type", code),
        })
        .collect()
}

fn convert_params(list: Node, code: &str) -> Vec<GoParam> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|decl| match decl.kind() {
            "parameter_declaration" => Some(GoParam {
                names: field_names(decl, code),
                ty: field_type(decl, "type", code),
            }),
            "variadic_parameter_declaration" => Some(GoParam {
                names: field_names(decl, code),
                ty: GoType::Variadic(Box::new(field_type(decl, "type", code))),
            }),
            _ => None,
        })
        .collect()
}

fn field_names(decl: Node, code: &str) -> Vec<String> {
    let mut cursor = decl.walk();
    decl.children_by_field_name("name", &mut cursor)
        .map(|n| node_text(&n, code).to_string())
        .collect()
}

fn field_type(node: Node, field: &str, code: &str) -> GoType {
    match node.child_by_field_name(field) {
        Some(child) => convert_type(child, code),
        None => other(node, code),
    }
}

fn convert_type(node: Node, code: &str) -> GoType {
    match node.kind() {
        "type_identifier" | "identifier" => GoType::Named(node_text(&node, code).to_string()),
        "pointer_type" => match node.named_child(0) {
            Some(inner) => GoType::Pointer(Box::new(convert_type(inner, code))),
            None => other(node, code),
        },
        "parenthesized_type" => match node.named_child(0) {
            Some(inner) => convert_type(inner, code),
            None => other(node, code),
        },
        "slice_type" => GoType::Slice(Box::new(field_type(node, "element", code))),
        "array_type" => GoType::Array {
            len: node
                .child_by_field_name("length")
                .map(|n| node_text(&n, code).to_string())
                .unwrap_or_default(),
            elem: Box::new(field_type(node, "element", code)),
        },
        "implicit_length_array_type" => GoType::Array {
            len: "...".to_string(),
            elem: Box::new(field_type(node, "element", code)),
        },
        "map_type" => GoType::Map {
            key: Box::new(field_type(node, "key", code)),
            value: Box::new(field_type(node, "value", code)),
        },
        "channel_type" => GoType::Chan {
            dir: channel_direction(node),
            elem: Box::new(field_type(node, "value", code)),
        },
        "struct_type" => GoType::Struct,
        "interface_type" => GoType::Interface,
        "function_type" => GoType::Func,
        "qualified_type" => {
            match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => GoType::Qualified {
                    package: node_text(&package, code).to_string(),
                    name: node_text(&name, code).to_string(),
                },
                _ => other(node, code),
            }
        }
        _ => other(node, code),
    }
}

fn other(node: Node, code: &str) -> GoType {
    GoType::Other {
        kind: node.kind().to_string(),
        text: node_text(&node, code).to_string(),
    }
}

// `<-chan T` starts with the arrow; `chan<- T` has it after the keyword.
fn channel_direction(node: Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|n| !n.is_named())
        .map(|n| n.kind())
        .collect();

    match tokens.as_slice() {
        ["<-", ..] => ChanDir::Recv,
        [_, "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

/// Get text for a tree-sitter node
fn node_text<'a>(node: &Node, code: &'a str) -> &'a str {
    &code[node.start_byte()..node.end_byte()]
}

/// Describe the first error or missing node. Lines and quoted text are
/// relative to the `user` range, so wrapper code never shows up.
fn first_syntax_error(root: Node, code: &str, user: &Range<usize>) -> Option<String> {
    if !root.has_error() {
        return None;
    }

    let prefix_lines = code[..user.start].matches('\n').count();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() || node.is_error() {
            let start = node.start_byte().clamp(user.start, user.end);
            let end = node.end_byte().clamp(start, user.end);
            let line = code[..start].matches('\n').count() + 1 - prefix_lines;
            if node.is_missing() {
                return Some(format!("missing `{}` on line {line}", node.kind()));
            }
            let snippet: String = code[start..end].chars().take(32).collect();
            let snippet = snippet.trim();
            return Some(if snippet.is_empty() {
                format!("syntax error on line {line}")
            } else {
                format!("unexpected `{snippet}` on line {line}")
            });
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    Some("syntax error".to_string())
}
