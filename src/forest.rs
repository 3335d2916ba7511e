//! Declaration forest.
//!
//! Nodes live in one arena owned by [`Forest`]; a node's `children` list is the
//! only place its children are referenced from above, and `parent` is a plain
//! index for walking upward. Construction goes through [`ForestBuilder`], which
//! only ever grows the arena; [`ForestBuilder::finish`] hands back a read-only
//! forest.
use crate::category::Category;
use crate::classify::{self, Classifier};
use crate::error::ForestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

// -------------------------------- Field ---------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    raw_type: String,
    category: Category,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        raw_type: impl Into<String>,
        classifier: &Classifier<'_>,
    ) -> Result<Self, ForestError> {
        let name = name.into();
        let raw_type = raw_type.into();
        if name.trim().is_empty() {
            return Err(ForestError::EmptyFieldName);
        }
        if raw_type.trim().is_empty() {
            return Err(ForestError::EmptyFieldType(name));
        }
        let category = classifier.classify(&raw_type);
        Ok(Self {
            name,
            raw_type,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }
    pub fn category(&self) -> Category {
        self.category
    }
    pub fn is_closure(&self) -> bool {
        classify::is_closure(&self.raw_type)
    }
    pub fn is_optional(&self) -> bool {
        classify::is_optional(&self.raw_type)
    }
}

// ----------------------------- Declaration ------------------------------- //

#[derive(Debug, Clone)]
pub struct Declaration {
    name: String,
    parent: Option<NodeId>,
    fields: Vec<Field>,
    children: Vec<NodeId>,
    sealed: bool,
}

impl Declaration {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

// -------------------------------- Forest --------------------------------- //

#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<Declaration>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Declaration> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Declaration::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Declaration::children).unwrap_or(&[])
    }

    /// `id` followed by each enclosing declaration up to its root.
    pub fn ancestry(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).map(|_| id), move |&n| self.parent(n))
    }

    /// Dotted path from the root, e.g. `Outer.Inner`.
    pub fn qualified_name(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestry(id)
            .filter_map(|n| self.node(n).map(Declaration::name))
            .collect();
        names.reverse();
        names.join(".")
    }

    /// Depth-first, pre-order over every tree in root order.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.nodes.iter().flat_map(|n| n.fields.iter())
    }

    /// Move another forest's trees after this one's, re-indexing its nodes.
    pub fn absorb(&mut self, other: Forest) {
        let offset = self.nodes.len();
        let shift = |id: NodeId| NodeId(id.0 + offset);
        self.roots.extend(other.roots.into_iter().map(shift));
        self.nodes.extend(other.nodes.into_iter().map(|mut n| {
            n.parent = n.parent.map(shift);
            n.children = n.children.into_iter().map(shift).collect();
            n
        }));
    }
}

// -------------------------------- Builder -------------------------------- //

/// Grows a forest from declaration and field events.
#[derive(Debug)]
pub struct ForestBuilder<'c> {
    classifier: Classifier<'c>,
    forest: Forest,
    scopes: Vec<NodeId>,
}

impl ForestBuilder<'static> {
    pub fn new() -> Self {
        Self::with_classifier(Classifier::standard())
    }
}

impl Default for ForestBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> ForestBuilder<'c> {
    pub fn with_classifier(classifier: Classifier<'c>) -> Self {
        Self {
            classifier,
            forest: Forest::default(),
            scopes: Vec::new(),
        }
    }

    pub fn classifier(&self) -> &Classifier<'c> {
        &self.classifier
    }

    /// Create a node; with a parent it is appended to that parent's children.
    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, ForestError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ForestError::EmptyDeclarationName);
        }
        if let Some(p) = parent {
            self.open_node(p)?;
        }
        let id = NodeId(self.forest.nodes.len());
        self.forest.nodes.push(Declaration {
            name,
            parent,
            fields: Vec::new(),
            children: Vec::new(),
            sealed: false,
        });
        match parent {
            Some(p) => self.forest.nodes[p.0].children.push(id),
            None => self.forest.roots.push(id),
        }
        Ok(id)
    }

    pub fn append_field(&mut self, node: NodeId, field: Field) -> Result<(), ForestError> {
        self.open_node(node)?.fields.push(field);
        Ok(())
    }

    /// Classify `raw_type` and append the resulting field.
    pub fn push_field(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        raw_type: impl Into<String>,
    ) -> Result<(), ForestError> {
        let field = Field::new(name, raw_type, &self.classifier)?;
        self.append_field(node, field)
    }

    /// Attach an existing root under `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), ForestError> {
        let current = self.forest.node(child).ok_or(ForestError::UnknownNode(child))?.parent;
        self.open_node(parent)?;
        if current.is_some() {
            return Err(ForestError::AlreadyParented { child });
        }
        if self.forest.ancestry(parent).any(|n| n == child) {
            return Err(ForestError::Cycle { parent, child });
        }
        self.forest.roots.retain(|&r| r != child);
        self.forest.nodes[child.0].parent = Some(parent);
        self.forest.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Mark a node read-only; later appends to it are rejected.
    pub fn seal(&mut self, node: NodeId) -> Result<(), ForestError> {
        let decl = self.forest.nodes.get_mut(node.0).ok_or(ForestError::UnknownNode(node))?;
        decl.sealed = true;
        Ok(())
    }

    // -- scope events -- //

    /// Open a declaration nested in the innermost open one (or as a root).
    pub fn open(&mut self, name: impl Into<String>) -> Result<NodeId, ForestError> {
        let id = self.create_node(name, self.current())?;
        self.scopes.push(id);
        Ok(id)
    }

    pub fn field(
        &mut self,
        name: impl Into<String>,
        raw_type: impl Into<String>,
    ) -> Result<(), ForestError> {
        let node = self.current().ok_or(ForestError::NoOpenScope)?;
        self.push_field(node, name, raw_type)
    }

    pub fn close(&mut self) -> Result<NodeId, ForestError> {
        let id = self.scopes.pop().ok_or(ForestError::NoOpenScope)?;
        self.seal(id)?;
        Ok(id)
    }

    pub fn current(&self) -> Option<NodeId> {
        self.scopes.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn finish(mut self) -> Forest {
        if !self.scopes.is_empty() {
            tracing::warn!(open = self.scopes.len(), "finishing with unclosed declarations");
        }
        for node in &mut self.forest.nodes {
            node.sealed = true;
        }
        self.forest
    }

    fn open_node(&mut self, id: NodeId) -> Result<&mut Declaration, ForestError> {
        let decl = self.forest.nodes.get_mut(id.0).ok_or(ForestError::UnknownNode(id))?;
        if decl.sealed {
            return Err(ForestError::Sealed(decl.name.clone()));
        }
        Ok(decl)
    }
}

// ------------------------------- Tests ------------------------------------ //
