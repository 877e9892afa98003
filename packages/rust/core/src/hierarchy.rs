//! Tree reconstruction from extracted navigation items.
//!
//! Items arrive in document order with an effective depth each. A stack of
//! open groups, strictly increasing in depth from bottom to top, decides where
//! every item lands. Open groups own their children and are attached to their
//! parent when they close, which keeps ownership linear and document order
//! intact: while a group is open nothing else can be appended to its parent.

use tracing::{debug, instrument};

use sidenav_shared::{Group, NavNode, NavigationItem};

/// An open group and the depth of the item that opened it.
#[derive(Debug)]
struct Frame {
    group: Group,
    depth: usize,
}

/// Incremental depth-stack tree builder.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    root: Vec<NavNode>,
    stack: Vec<Frame>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one item in the tree.
    pub fn push(&mut self, item: &NavigationItem) {
        self.close_from(item.depth);

        if item.has_children {
            self.stack.push(Frame {
                group: Group::new(item.title.clone()),
                depth: item.depth,
            });
            return;
        }

        match &item.href {
            Some(href) => self.attach(NavNode::Page(href.clone())),
            None => debug!(title = %item.title, "page item without a link, dropping"),
        }
    }

    /// Depths of the currently open groups, bottom to top.
    pub fn open_depths(&self) -> Vec<usize> {
        self.stack.iter().map(|frame| frame.depth).collect()
    }

    /// Close every open group and return the top-level nodes.
    pub fn finish(mut self) -> Vec<NavNode> {
        self.close_from(0);
        self.root
    }

    /// Close open groups whose depth is `>= depth`.
    fn close_from(&mut self, depth: usize) {
        while self.stack.last().is_some_and(|frame| frame.depth >= depth) {
            if let Some(frame) = self.stack.pop() {
                self.attach(NavNode::Group(frame.group));
            }
        }
    }

    fn attach(&mut self, node: NavNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.group.children.push(node),
            None => self.root.push(node),
        }
    }
}

/// Build the navigation tree for a full item list.
#[instrument(skip_all, fields(items = items.len()))]
pub fn build_tree(items: &[NavigationItem]) -> Vec<NavNode> {
    let mut builder = HierarchyBuilder::new();
    for item in items {
        builder.push(item);
    }
    let root = builder.finish();
    debug!(top_level = root.len(), "tree built");
    root
}
