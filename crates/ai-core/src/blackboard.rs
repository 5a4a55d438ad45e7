use std::any::{self, Any};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::BlackboardError;

/// Which blackboard a symbol lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scope {
    /// Owned by a single agent and created with it.
    #[default]
    Local,
    /// Shared by every tree that is handed the same global board.
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => f.write_str("local"),
            Scope::Global => f.write_str("global"),
        }
    }
}

struct Entry {
    value: Box<dyn Any>,
    type_name: &'static str,
}

/// Symbol-keyed store of arbitrarily typed values.
///
/// Values are looked up by name and downcast on every access; a mismatch
/// between the stored and requested type is reported, never papered over.
#[derive(Default)]
pub struct Blackboard {
    scope: Scope,
    values: BTreeMap<String, Entry>,
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blackboard")
            .field("scope", &self.scope)
            .field(
                "values",
                &self
                    .values
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.type_name))
                    .collect::<BTreeMap<_, _>>(),
            )
            .finish()
    }
}

impl Blackboard {
    /// A per-agent board.
    pub fn new() -> Self {
        Self::default()
    }

    /// A board meant to be shared between agents.
    pub fn global() -> Self {
        Self {
            scope: Scope::Global,
            values: BTreeMap::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.values.contains_key(symbol)
    }

    /// Store `value` under `symbol`, replacing whatever was there (of any type).
    pub fn set<T: 'static>(&mut self, symbol: impl Into<String>, value: T) {
        self.values.insert(
            symbol.into(),
            Entry {
                value: Box::new(value),
                type_name: any::type_name::<T>(),
            },
        );
    }

    pub fn get<T: 'static>(&self, symbol: &str) -> Result<&T, BlackboardError> {
        let entry = self.entry(symbol)?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| self.mismatch::<T>(symbol, entry.type_name))
    }

    pub fn get_mut<T: 'static>(&mut self, symbol: &str) -> Result<&mut T, BlackboardError> {
        let scope = self.scope;
        let entry = self
            .values
            .get_mut(symbol)
            .ok_or_else(|| BlackboardError::Missing {
                symbol: symbol.to_string(),
                scope,
            })?;
        let stored = entry.type_name;
        entry
            .value
            .downcast_mut::<T>()
            .ok_or_else(|| BlackboardError::TypeMismatch {
                symbol: symbol.to_string(),
                scope,
                stored,
                expected: any::type_name::<T>(),
            })
    }

    /// Remove and return the value. A type mismatch leaves the entry in place.
    pub fn remove<T: 'static>(&mut self, symbol: &str) -> Result<T, BlackboardError> {
        let entry = self.entry(symbol)?;
        if !entry.value.is::<T>() {
            return Err(self.mismatch::<T>(symbol, entry.type_name));
        }
        let stored = entry.type_name;
        match self.values.remove(symbol) {
            Some(entry) => entry
                .value
                .downcast::<T>()
                .map(|b| *b)
                .map_err(|_| self.mismatch::<T>(symbol, stored)),
            None => Err(self.missing(symbol)),
        }
    }

    fn entry(&self, symbol: &str) -> Result<&Entry, BlackboardError> {
        self.values.get(symbol).ok_or_else(|| self.missing(symbol))
    }

    fn missing(&self, symbol: &str) -> BlackboardError {
        BlackboardError::Missing {
            symbol: symbol.to_string(),
            scope: self.scope,
        }
    }

    fn mismatch<T: 'static>(&self, symbol: &str, stored: &'static str) -> BlackboardError {
        BlackboardError::TypeMismatch {
            symbol: symbol.to_string(),
            scope: self.scope,
            stored,
            expected: any::type_name::<T>(),
        }
    }
}

/// The two boards visible to a task during one tick.
///
/// The global board is borrowed from whoever owns it for the duration of the
/// tick; nothing in the engine keeps a process-wide instance.
pub struct Blackboards<'a> {
    local: &'a mut Blackboard,
    global: &'a mut Blackboard,
}

impl<'a> Blackboards<'a> {
    pub fn new(local: &'a mut Blackboard, global: &'a mut Blackboard) -> Self {
        Self { local, global }
    }

    pub fn scope(&self, scope: Scope) -> &Blackboard {
        match scope {
            Scope::Local => &*self.local,
            Scope::Global => &*self.global,
        }
    }

    pub fn scope_mut(&mut self, scope: Scope) -> &mut Blackboard {
        match scope {
            Scope::Local => &mut *self.local,
            Scope::Global => &mut *self.global,
        }
    }

    pub fn local(&self) -> &Blackboard {
        &*self.local
    }

    pub fn local_mut(&mut self) -> &mut Blackboard {
        &mut *self.local
    }

    pub fn global(&self) -> &Blackboard {
        &*self.global
    }

    pub fn global_mut(&mut self) -> &mut Blackboard {
        &mut *self.global
    }
}

/// Typed, indirect handle to a blackboard symbol.
///
/// A reference is only a name and a scope. Every accessor performs a fresh
/// lookup, so a value rewritten by another task (or by a collaborator such as
/// navigation) is observed on the very next read.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct Reference<T: 'static> {
    symbol: Cow<'static, str>,
    #[cfg_attr(feature = "serde", serde(default))]
    scope: Scope,
    #[cfg_attr(feature = "serde", serde(skip))]
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Self {
            symbol: self.symbol.clone(),
            scope: self.scope,
            _phantom: PhantomData,
        }
    }
}

impl<T: 'static> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.scope == other.scope
    }
}

impl<T: 'static> Eq for Reference<T> {}

impl<T: 'static> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("symbol", &self.symbol)
            .field("scope", &self.scope)
            .field("type", &any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Reference<T> {
    pub fn new(symbol: impl Into<Cow<'static, str>>, scope: Scope) -> Self {
        Self {
            symbol: symbol.into(),
            scope,
            _phantom: PhantomData,
        }
    }

    pub const fn local(symbol: &'static str) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            scope: Scope::Local,
            _phantom: PhantomData,
        }
    }

    pub const fn global(symbol: &'static str) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            scope: Scope::Global,
            _phantom: PhantomData,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn get<'b>(&self, blackboard: &'b Blackboards<'_>) -> Result<&'b T, BlackboardError> {
        blackboard.scope(self.scope).get(&self.symbol)
    }

    pub fn get_mut<'b>(
        &self,
        blackboard: &'b mut Blackboards<'_>,
    ) -> Result<&'b mut T, BlackboardError> {
        blackboard.scope_mut(self.scope).get_mut(&self.symbol)
    }

    pub fn get_cloned(&self, blackboard: &Blackboards<'_>) -> Result<T, BlackboardError>
    where
        T: Clone,
    {
        self.get(blackboard).cloned()
    }

    pub fn set(&self, blackboard: &mut Blackboards<'_>, value: T) {
        blackboard
            .scope_mut(self.scope)
            .set(self.symbol.clone().into_owned(), value);
    }

    pub fn is_set(&self, blackboard: &Blackboards<'_>) -> bool {
        self.get(blackboard).is_ok()
    }
}
