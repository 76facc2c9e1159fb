//! Selector queries over JSON documents
//!
//! A small evaluator for CouchDB-style query documents, enough to back the
//! predicate-query capability of [`MemoryLedger`](crate::MemoryLedger):
//!
//! ```text
//! {
//!   "selector": {"docType": "work", "workenddate": {"$gt": 30}},
//!   "fields":   ["uid", "workenddate"],
//!   "sort":     [{"workenddate": "desc"}],
//!   "limit":    10,
//!   "skip":     0
//! }
//! ```
//!
//! Supported operators: `$eq $ne $gt $gte $lt $lte $in $nin $exists` on
//! fields (dotted paths reach nested members), and `$and $or $nor $not` as
//! combinators. `use_index` and `bookmark` are accepted and ignored. Anything
//! else is a `QuerySyntax` error.
//!
//! Values that are not JSON objects (index sentinels, raw bytes) never match.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use worksledger_core::{key, KvPair, LedgerError, LedgerResult};

fn syntax(message: impl Into<String>) -> LedgerError {
    LedgerError::query_syntax(message)
}

/// Direction of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
enum Selector {
    And(Vec<Selector>),
    Or(Vec<Selector>),
    Nor(Vec<Selector>),
    Not(Box<Selector>),
    Field { path: Vec<String>, op: Op },
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Exists(bool),
}

/// A parsed query document
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorQuery {
    selector: Selector,
    fields: Option<Vec<String>>,
    sort: Vec<(String, SortOrder)>,
    limit: Option<usize>,
    skip: usize,
}

impl SelectorQuery {
    /// Parse a query document
    pub fn parse(expression: &str) -> LedgerResult<Self> {
        let root: Value = serde_json::from_str(expression)
            .map_err(|e| syntax(format!("invalid query JSON: {}", e)))?;
        let obj = root
            .as_object()
            .ok_or_else(|| syntax("query must be a JSON object"))?;

        let mut query = SelectorQuery {
            selector: Selector::And(Vec::new()),
            fields: None,
            sort: Vec::new(),
            limit: None,
            skip: 0,
        };
        let mut saw_selector = false;

        for (name, value) in obj {
            match name.as_str() {
                "selector" => {
                    let map = value
                        .as_object()
                        .ok_or_else(|| syntax("selector must be a JSON object"))?;
                    query.selector = parse_selector(map)?;
                    saw_selector = true;
                }
                "fields" => query.fields = Some(parse_fields(value)?),
                "sort" => query.sort = parse_sort(value)?,
                "limit" => query.limit = Some(parse_count("limit", value)?),
                "skip" => query.skip = parse_count("skip", value)?,
                "use_index" | "bookmark" => {}
                other => return Err(syntax(format!("unknown query member {:?}", other))),
            }
        }

        if !saw_selector {
            return Err(syntax("query has no selector"));
        }
        Ok(query)
    }

    /// Evaluate against stored pairs, returning matches in result order
    ///
    /// Composite keys and values that are not JSON objects are skipped.
    pub fn execute<'a, I>(&self, entries: I) -> Vec<KvPair>
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<u8>)>,
    {
        let mut hits: Vec<(String, Value)> = entries
            .into_iter()
            .filter(|(k, _)| !key::is_composite(k))
            .filter_map(|(k, v)| {
                let doc: Value = serde_json::from_slice(v).ok()?;
                if !doc.is_object() {
                    return None;
                }
                self.selector.matches(&doc).then(|| (k.clone(), doc))
            })
            .collect();

        if !self.sort.is_empty() {
            hits.sort_by(|(_, a), (_, b)| self.compare_for_sort(a, b));
        }

        hits.into_iter()
            .skip(self.skip)
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|(k, doc)| {
                let doc = match &self.fields {
                    Some(fields) => project(&doc, fields),
                    None => doc,
                };
                // Serializing a Value cannot fail.
                let bytes = serde_json::to_vec(&doc).unwrap_or_default();
                (k, bytes)
            })
            .collect()
    }

    fn compare_for_sort(&self, a: &Value, b: &Value) -> Ordering {
        for (field, order) in &self.sort {
            let path: Vec<String> = field.split('.').map(str::to_string).collect();
            let ord = collate(lookup(a, &path), lookup(b, &path));
            let ord = match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

// =============================================================================
// Parsing
// =============================================================================

fn parse_selector(map: &Map<String, Value>) -> LedgerResult<Selector> {
    let mut clauses = map
        .iter()
        .map(|(name, value)| parse_member(name, value))
        .collect::<LedgerResult<Vec<_>>>()?;
    if clauses.len() == 1 {
        Ok(clauses.remove(0))
    } else {
        Ok(Selector::And(clauses))
    }
}

fn parse_selector_list(op: &str, value: &Value) -> LedgerResult<Vec<Selector>> {
    let items = value
        .as_array()
        .ok_or_else(|| syntax(format!("{} expects an array of selectors", op)))?;
    items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| syntax(format!("{} members must be objects", op)))
                .and_then(parse_selector)
        })
        .collect()
}

fn parse_member(name: &str, value: &Value) -> LedgerResult<Selector> {
    match name {
        "$and" => Ok(Selector::And(parse_selector_list(name, value)?)),
        "$or" => Ok(Selector::Or(parse_selector_list(name, value)?)),
        "$nor" => Ok(Selector::Nor(parse_selector_list(name, value)?)),
        "$not" => {
            let map = value
                .as_object()
                .ok_or_else(|| syntax("$not expects a selector object"))?;
            Ok(Selector::Not(Box::new(parse_selector(map)?)))
        }
        op if op.starts_with('$') => Err(syntax(format!("unknown combinator {:?}", op))),
        field => {
            if field.is_empty() {
                return Err(syntax("empty field name in selector"));
            }
            let path: Vec<String> = field.split('.').map(str::to_string).collect();
            parse_condition(path, value)
        }
    }
}

fn parse_condition(path: Vec<String>, value: &Value) -> LedgerResult<Selector> {
    let operators = match value {
        Value::Object(map) if !map.is_empty() && map.keys().all(|k| k.starts_with('$')) => map,
        _ => {
            return Ok(Selector::Field {
                path,
                op: Op::Eq(value.clone()),
            })
        }
    };

    let mut clauses = Vec::with_capacity(operators.len());
    for (name, operand) in operators {
        let clause = if name == "$not" {
            Selector::Not(Box::new(parse_condition(path.clone(), operand)?))
        } else {
            Selector::Field {
                path: path.clone(),
                op: parse_op(name, operand)?,
            }
        };
        clauses.push(clause);
    }
    if clauses.len() == 1 {
        Ok(clauses.remove(0))
    } else {
        Ok(Selector::And(clauses))
    }
}

fn parse_op(name: &str, operand: &Value) -> LedgerResult<Op> {
    let list = |op: &str| -> LedgerResult<Vec<Value>> {
        operand
            .as_array()
            .cloned()
            .ok_or_else(|| syntax(format!("{} expects an array", op)))
    };
    match name {
        "$eq" => Ok(Op::Eq(operand.clone())),
        "$ne" => Ok(Op::Ne(operand.clone())),
        "$gt" => Ok(Op::Gt(operand.clone())),
        "$gte" => Ok(Op::Gte(operand.clone())),
        "$lt" => Ok(Op::Lt(operand.clone())),
        "$lte" => Ok(Op::Lte(operand.clone())),
        "$in" => Ok(Op::In(list(name)?)),
        "$nin" => Ok(Op::Nin(list(name)?)),
        "$exists" => operand
            .as_bool()
            .map(Op::Exists)
            .ok_or_else(|| syntax("$exists expects a boolean")),
        other => Err(syntax(format!("unknown operator {:?}", other))),
    }
}

fn parse_fields(value: &Value) -> LedgerResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| syntax("fields must be an array"))?;
    items
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| syntax("fields must contain strings"))
        })
        .collect()
}

fn parse_sort(value: &Value) -> LedgerResult<Vec<(String, SortOrder)>> {
    let items = value
        .as_array()
        .ok_or_else(|| syntax("sort must be an array"))?;
    items
        .iter()
        .map(|item| match item {
            Value::String(field) => Ok((field.clone(), SortOrder::Asc)),
            Value::Object(map) if map.len() == 1 => {
                let (field, dir) = map.iter().next().ok_or_else(|| syntax("empty sort entry"))?;
                let order = match dir.as_str() {
                    Some("asc") => SortOrder::Asc,
                    Some("desc") => SortOrder::Desc,
                    _ => {
                        return Err(syntax(format!(
                            "sort direction for {} must be asc or desc",
                            field
                        )))
                    }
                };
                Ok((field.clone(), order))
            }
            _ => Err(syntax("sort entries must be a field name or {field: direction}")),
        })
        .collect()
}

fn parse_count(name: &str, value: &Value) -> LedgerResult<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| syntax(format!("{} must be a non-negative integer", name)))
}

// =============================================================================
// Evaluation
// =============================================================================

impl Selector {
    fn matches(&self, doc: &Value) -> bool {
        match self {
            Selector::And(all) => all.iter().all(|s| s.matches(doc)),
            Selector::Or(any) => any.iter().any(|s| s.matches(doc)),
            Selector::Nor(none) => !none.iter().any(|s| s.matches(doc)),
            Selector::Not(inner) => !inner.matches(doc),
            Selector::Field { path, op } => op.matches(lookup(doc, path)),
        }
    }
}

impl Op {
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Op::Exists(expected) => value.is_some() == *expected,
            Op::Eq(x) => value.map_or(false, |v| json_eq(v, x)),
            Op::Ne(x) => value.map_or(false, |v| !json_eq(v, x)),
            Op::Gt(x) => ordered(value, x, |o| o == Ordering::Greater),
            Op::Gte(x) => ordered(value, x, |o| o != Ordering::Less),
            Op::Lt(x) => ordered(value, x, |o| o == Ordering::Less),
            Op::Lte(x) => ordered(value, x, |o| o != Ordering::Greater),
            Op::In(list) => value.map_or(false, |v| list.iter().any(|x| json_eq(v, x))),
            Op::Nin(list) => value.map_or(false, |v| !list.iter().any(|x| json_eq(v, x))),
        }
    }
}

fn lookup<'a>(doc: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |cur, segment| cur.as_object()?.get(segment))
}

fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Same-type comparison; mixed types are incomparable and never match a
/// range operator.
fn ordered(value: Option<&Value>, operand: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    let Some(v) = value else { return false };
    let ord = match (v, operand) {
        (Value::Number(a), Value::Number(b)) => a.as_f64().partial_cmp(&b.as_f64()),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };
    ord.map_or(false, accept)
}

/// Total order for sorting: missing < null < bool < number < string <
/// array < object.
fn collate(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_)) => 5,
            Some(Value::Object(_)) => 6,
        }
    }
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn project(doc: &Value, fields: &[String]) -> Value {
    let mut out = Map::new();
    for field in fields {
        let path: Vec<String> = field.split('.').map(str::to_string).collect();
        if let Some(v) = lookup(doc, &path) {
            insert_path(&mut out, &path, v.clone());
        }
    }
    Value::Object(out)
}

fn insert_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
    match path {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = child {
                insert_path(inner, rest, value);
            }
        }
    }
}
