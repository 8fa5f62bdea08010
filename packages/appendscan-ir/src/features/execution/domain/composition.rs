//! Selectors and compositions
//!
//! A [`Selector`] names one field of one value. A [`Composition`] describes a
//! value assembled from several selectors at different embedding paths, e.g.
//! `User{Name: a, Meta: Meta{Phone: c}}` is `[(Name, a), (Meta.Phone, c)]`.

use crate::shared::models::ValueId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered field names, outermost first
pub type FieldPath = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Selector {
    pub value: ValueId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: FieldPath,
}

impl Selector {
    pub fn new(value: ValueId, path: FieldPath) -> Self {
        Self { value, path }
    }

    /// The whole value, empty path
    pub fn whole(value: ValueId) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn blank() -> Self {
        Self::whole(ValueId::BLANK)
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }

    pub fn is_whole(&self) -> bool {
        self.path.is_empty()
    }

    pub fn field(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self::new(self.value, path)
    }

    pub fn extend(&self, suffix: &[String]) -> Self {
        let mut path = self.path.clone();
        path.extend_from_slice(suffix);
        Self::new(self.value, path)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        for field in &self.path {
            write!(f, ".{}", field)?;
        }
        Ok(())
    }
}

/// One source of a composition, placed at `path` inside the composed value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: FieldPath,
    pub selector: Selector,
}

impl Embed {
    pub fn new(path: FieldPath, selector: Selector) -> Self {
        Self { path, selector }
    }

    /// Field access on the embedded region.
    ///
    /// An embed placed under `name` loses that leading component. An embed at
    /// the root of a tracked value turns into a selector one level deeper.
    pub fn select(&self, name: &str) -> Option<Embed> {
        match self.path.split_first() {
            Some((head, rest)) if head == name => {
                Some(Embed::new(rest.to_vec(), self.selector.clone()))
            }
            Some(_) => None,
            None if self.selector.is_blank() => None,
            None => Some(Embed::new(Vec::new(), self.selector.field(name))),
        }
    }

    /// Place the embed one level deeper, under `name`
    pub fn nest(&self, name: &str) -> Embed {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.push(name.to_string());
        path.extend(self.path.iter().cloned());
        Embed::new(path, self.selector.clone())
    }
}

/// An empty composition means unknown provenance
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition(Vec<Embed>);

impl Composition {
    pub fn new(embeds: Vec<Embed>) -> Self {
        Self(embeds)
    }

    pub fn unknown() -> Self {
        Self(Vec::new())
    }

    pub fn blank() -> Self {
        Self::of(Selector::blank())
    }

    pub fn of(selector: Selector) -> Self {
        Self(vec![Embed::new(Vec::new(), selector)])
    }

    pub fn embeds(&self) -> &[Embed] {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    /// Whole-value alias of a single selector, if that is all this is
    pub fn as_selector(&self) -> Option<&Selector> {
        match self.0.as_slice() {
            [embed] if embed.path.is_empty() => Some(&embed.selector),
            _ => None,
        }
    }

    pub fn push(&mut self, embed: Embed) {
        self.0.push(embed);
    }

    /// Every embed that survives selecting `name`; blank when none does
    pub fn select(&self, name: &str) -> Composition {
        let selected: Vec<Embed> = self.0.iter().filter_map(|e| e.select(name)).collect();
        if selected.is_empty() {
            Composition::blank()
        } else {
            Composition(selected)
        }
    }

    pub fn select_path(&self, path: &[String]) -> Composition {
        path.iter()
            .fold(self.clone(), |composition, name| composition.select(name))
    }

    /// The same composition embedded under field `name`
    pub fn nest(&self, name: &str) -> Composition {
        Composition(self.0.iter().map(|e| e.nest(name)).collect())
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, embed) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if embed.path.is_empty() {
                write!(f, "{}", embed.selector)?;
            } else {
                write!(f, "{}: {}", embed.path.join("."), embed.selector)?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(fields: &[&str]) -> FieldPath {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_select_on_tracked_root_deepens_selector() {
        let user = ValueId::new(3);
        let embed = Embed::new(Vec::new(), Selector::whole(user));
        let selected = embed.select("Meta").unwrap();
        assert!(selected.path.is_empty());
        assert_eq!(selected.selector, Selector::new(user, path(&["Meta"])));
    }

    #[test]
    fn test_select_strips_matching_embedding() {
        let b = ValueId::new(1);
        let embed = Embed::new(path(&["Meta", "Address"]), Selector::whole(b));
        let selected = embed.select("Meta").unwrap();
        assert_eq!(selected.path, path(&["Address"]));
        assert!(embed.select("Name").is_none());
    }

    #[test]
    fn test_select_on_blank_root_is_unmatched() {
        assert!(Embed::new(Vec::new(), Selector::blank()).select("x").is_none());
        assert_eq!(Composition::unknown().select("x"), Composition::blank());
    }

    #[test]
    fn test_composition_select_keeps_every_match() {
        let composition = Composition::new(vec![
            Embed::new(path(&["Name"]), Selector::whole(ValueId::new(0))),
            Embed::new(path(&["Meta", "Address"]), Selector::whole(ValueId::new(1))),
            Embed::new(path(&["Meta", "Phone"]), Selector::whole(ValueId::new(2))),
        ]);
        let meta = composition.select("Meta");
        assert_eq!(meta.embeds().len(), 2);

        let phone = composition.select_path(&path(&["Meta", "Phone"]));
        assert_eq!(phone.as_selector(), Some(&Selector::whole(ValueId::new(2))));
    }

    #[test]
    fn test_nest_prefixes_paths() {
        let inner = Composition::of(Selector::whole(ValueId::new(7)));
        let nested = inner.nest("Meta").nest("Outer");
        assert_eq!(nested.embeds()[0].path, path(&["Outer", "Meta"]));
    }

    #[test]
    fn test_selector_display() {
        let sel = Selector::new(ValueId::new(3), path(&["Meta", "Phone"]));
        assert_eq!(sel.to_string(), "$3.Meta.Phone");
        assert_eq!(Selector::blank().to_string(), "_");
    }
}
