//! Query Tree - the read-only tree the advisory engines inspect
//!
//! Every node carries a closed [`NodeKind`], an ordered map of named child
//! slots (WHERE, ON, left/right operands, ...) and an ordered list of
//! positional children (projection items, function arguments, IN lists).
//! The tree is built once by the lowering pass and never mutated afterwards.

use indexmap::IndexMap;
use serde::Serialize;

/// Kind of a node in the query tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // Statements
    Select,
    Insert,
    Update,
    Delete,
    SetOperation(SetOperator),

    // Clause wrappers
    With,
    Projection,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Join,

    // References
    Table(TableRef),
    Column(ColumnRef),
    Star(Option<String>),
    Cte(String),
    Alias(String),
    Subquery,

    // Expressions
    Literal(Literal),
    Function(FunctionCall),
    Binary(BinaryOp),
    And,
    Or,
    Not,
    Like,
    In,

    /// Anything the lowering pass does not model, kept as its SQL text
    Other(String),
}

impl NodeKind {
    /// Short uppercase label, used for query-type reporting
    pub fn label(&self) -> &str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::SetOperation(op) => op.as_str(),
            Self::With => "WITH",
            Self::Projection => "PROJECTION",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::Limit => "LIMIT",
            Self::Join => "JOIN",
            Self::Table(_) => "TABLE",
            Self::Column(_) => "COLUMN",
            Self::Star(_) => "STAR",
            Self::Cte(_) => "CTE",
            Self::Alias(_) => "ALIAS",
            Self::Subquery => "SUBQUERY",
            Self::Literal(_) => "LITERAL",
            Self::Function(_) => "FUNCTION",
            Self::Binary(_) => "BINARY",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Other(_) => "OTHER",
        }
    }
}

/// Set operation combining two queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// Binary operators that are not boolean connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Arithmetic,
    Other,
}

impl BinaryOp {
    /// Returns true for comparison operators
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// A table reference as written in FROM/JOIN/UPDATE/INSERT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Bare table name (last component of a qualified name)
    pub name: String,
    /// Alias introduced for the table, if any
    pub alias: Option<String>,
}

/// A column reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Bare column name
    pub name: String,
    /// Table or alias qualifier as written (`u` in `u.id`)
    pub qualifier: Option<String>,
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    Other(String),
}

impl Literal {
    /// Returns the string payload when this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Function name as written
    pub name: String,
    /// The whole call rendered back to SQL
    pub sql: String,
}

/// Named child positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    With,
    Projection,
    From,
    Target,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    On,
    Left,
    Right,
    Operand,
    Pattern,
    Query,
    Source,
}

/// A node in the query tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    slots: IndexMap<Slot, Node>,
    children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            slots: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets a named slot
    pub fn with_slot(mut self, slot: Slot, node: Node) -> Self {
        self.slots.insert(slot, node);
        self
    }

    /// Sets a named slot when a node is present
    pub fn with_optional_slot(mut self, slot: Slot, node: Option<Node>) -> Self {
        if let Some(node) = node {
            self.slots.insert(slot, node);
        }
        self
    }

    /// Adds a positional child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Adds positional children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the node stored in a named slot
    pub fn slot(&self, slot: Slot) -> Option<&Node> {
        self.slots.get(&slot)
    }

    /// Returns true if the named slot is filled
    pub fn has_slot(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the single expression held by a clause wrapper (WHERE, HAVING, ON, LIMIT)
    pub fn predicate(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Left operand of a binary-shaped node
    pub fn left(&self) -> Option<&Node> {
        self.slot(Slot::Left)
    }

    /// Right operand of a binary-shaped node
    pub fn right(&self) -> Option<&Node> {
        self.slot(Slot::Right)
    }

    pub fn column(&self) -> Option<&ColumnRef> {
        match &self.kind {
            NodeKind::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&TableRef> {
        match &self.kind {
            NodeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<&Literal> {
        match &self.kind {
            NodeKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Returns the string value when this node is a string literal
    pub fn string_literal(&self) -> Option<&str> {
        self.literal().and_then(Literal::as_str)
    }

    /// Direct sub-nodes: slots in insertion order, then positional children
    pub fn sub_nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.values().chain(self.children.iter())
    }

    /// Iterates over this node and all its descendants (pre-order, slots before children)
    pub fn walk(&self) -> NodeWalker<'_> {
        NodeWalker::new(self)
    }

    /// Counts nodes in this subtree (including self) matching a predicate
    pub fn count_where(&self, predicate: impl Fn(&NodeKind) -> bool) -> usize {
        self.walk().filter(|n| predicate(n.kind())).count()
    }

    /// Returns all column references in this subtree, in traversal order
    pub fn columns(&self) -> impl Iterator<Item = &ColumnRef> {
        self.walk().filter_map(Node::column)
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

/// Iterator for traversing a subtree depth-first
pub struct NodeWalker<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> NodeWalker<'a> {
    fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for NodeWalker<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so slots come out first, in insertion order, then children
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        for slot in node.slots.values().rev() {
            self.stack.push(slot);
        }
        Some(node)
    }
}
