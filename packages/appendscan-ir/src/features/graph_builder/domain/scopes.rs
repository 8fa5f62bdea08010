//! Lexical scope table
//!
//! Frames form a parent chain; every frame of one function shares a single
//! fresh-identifier counter so ids never collide across nested blocks.

use crate::shared::models::ValueId;
use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::rc::Rc;

/// Discard name; always resolves to [`ValueId::BLANK`]
pub const BLANK_NAME: &str = "_";

#[derive(Debug)]
pub struct Scopes<'p> {
    parent: Option<&'p Scopes<'p>>,
    vars: FxHashMap<String, ValueId>,
    next_id: Rc<Cell<u32>>,
}

impl Scopes<'static> {
    /// Root frame of a function, counter at zero
    pub fn new() -> Self {
        Self {
            parent: None,
            vars: FxHashMap::default(),
            next_id: Rc::new(Cell::new(0)),
        }
    }
}

impl<'p> Scopes<'p> {
    /// Child frame sharing this frame's counter
    pub fn push_frame(&self) -> Scopes<'_> {
        Scopes {
            parent: Some(self),
            vars: FxHashMap::default(),
            next_id: Rc::clone(&self.next_id),
        }
    }

    /// Allocate an identifier not bound to any name
    pub fn fresh(&self) -> ValueId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ValueId::new(id)
    }

    /// Bind `name` to a fresh identifier in the innermost frame
    pub fn create_variable(&mut self, name: &str) -> ValueId {
        if name == BLANK_NAME {
            return ValueId::BLANK;
        }
        let id = self.fresh();
        self.vars.insert(name.to_string(), id);
        id
    }

    /// Innermost binding of `name`, searching outward
    pub fn lookup(&self, name: &str) -> Option<ValueId> {
        if name == BLANK_NAME {
            return Some(ValueId::BLANK);
        }
        let mut frame = Some(self);
        while let Some(scope) = frame {
            if let Some(&id) = scope.vars.get(name) {
                return Some(id);
            }
            frame = scope.parent;
        }
        None
    }

    pub fn lookup_or_blank(&self, name: &str) -> ValueId {
        self.lookup(name).unwrap_or(ValueId::BLANK)
    }

    /// Identifiers handed out so far by the shared counter
    pub fn allocated(&self) -> u32 {
        self.next_id.get()
    }
}

impl Default for Scopes<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut scopes = Scopes::new();
        let a = scopes.create_variable("a");
        let b = scopes.create_variable("b");
        assert_ne!(a, b);
        assert_eq!(scopes.lookup("a"), Some(a));
        assert_eq!(scopes.lookup("missing"), None);
        assert_eq!(scopes.lookup_or_blank("missing"), ValueId::BLANK);
    }

    #[test]
    fn test_blank_name_never_binds() {
        let mut scopes = Scopes::new();
        assert_eq!(scopes.create_variable(BLANK_NAME), ValueId::BLANK);
        assert_eq!(scopes.lookup(BLANK_NAME), Some(ValueId::BLANK));
        assert_eq!(scopes.allocated(), 0);
    }

    #[test]
    fn test_child_frame_shadows_and_shares_counter() {
        let mut outer = Scopes::new();
        let x_outer = outer.create_variable("x");
        {
            let mut inner = outer.push_frame();
            assert_eq!(inner.lookup("x"), Some(x_outer));

            let x_inner = inner.create_variable("x");
            assert_ne!(x_inner, x_outer);
            assert_eq!(inner.lookup("x"), Some(x_inner));

            let mut deeper = inner.push_frame();
            let y = deeper.create_variable("y");
            assert_eq!(y, ValueId::new(2));
        }
        assert_eq!(outer.lookup("x"), Some(x_outer));
        assert_eq!(outer.lookup("y"), None);
        // EDGE CASE: ids keep increasing after a child frame is dropped
        assert_eq!(outer.create_variable("z"), ValueId::new(3));
    }

    #[test]
    fn test_fresh_is_unbound() {
        let scopes = Scopes::new();
        let first = scopes.fresh();
        let second = scopes.fresh();
        assert_eq!(first, ValueId::new(0));
        assert_eq!(second, ValueId::new(1));
    }
}
