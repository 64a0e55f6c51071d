use std::collections::BTreeMap;

/// ARIA role of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Tree,
    TreeItem,
    Group,
    Button,
    Note,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Tree => "tree",
            Role::TreeItem => "treeitem",
            Role::Group => "group",
            Role::Button => "button",
            Role::Note => "note",
        }
    }
}

/// A node of the headless element tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub id: String,
    pub role: Option<Role>,
    /// `aria-*` and `data-*` attributes, by name.
    pub attrs: BTreeMap<String, String>,
    /// `None` means not focusable at all; `-1` focusable only programmatically.
    pub tab_index: Option<i32>,
    pub disabled: bool,
    pub hidden: bool,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.insert(name.into(), value.to_string());
        self
    }

    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Reachable with Tab: non-negative tab index, enabled, shown.
    pub fn is_tabbable(&self) -> bool {
        self.tab_index.is_some_and(|t| t >= 0) && !self.disabled && !self.hidden
    }

    /// Can receive programmatic focus.
    pub fn is_focusable(&self) -> bool {
        self.tab_index.is_some() && !self.disabled
    }
}

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_element(child, id))
}

pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }
    root.children
        .iter_mut()
        .find_map(|child| find_element_mut(child, id))
}

/// Collect all tabbable element IDs in tree order.
pub fn collect_tabbable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_recursive(element, &mut result, &|el| el.is_tabbable());
    result
}

/// Collect IDs of all elements carrying `role`, in tree order.
pub fn collect_with_role(element: &Element, role: Role) -> Vec<String> {
    let mut result = Vec::new();
    collect_recursive(element, &mut result, &|el| el.role == Some(role));
    result
}

fn collect_recursive(element: &Element, result: &mut Vec<String>, pred: &dyn Fn(&Element) -> bool) {
    if pred(element) {
        result.push(element.id.clone());
    }
    for child in &element.children {
        collect_recursive(child, result, pred);
    }
}
