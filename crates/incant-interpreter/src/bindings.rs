//! Scoped symbol resolution.
//!
//! All interpreter state that is visible to scripts lives here: loaded
//! modules, module aliases, user variables, named addresses and internal
//! bookkeeping entries. Bindings are grouped into frames forming a scope
//! chain; lookups walk from the innermost frame outward, so an inner
//! binding shadows an outer one with the same identifier.

use std::collections::BTreeMap;
use std::fmt;

use incant_types::{EvalError, Value};

use crate::module::ModuleData;

/// Bookkeeping identifier holding the active module of a scope.
pub const SCOPE_MODULE: &str = "scopeModule";

/// Module preloaded into every script.
pub const DEFAULT_MODULE: &str = "std";

/// Namespaces a binding can live in. The same identifier may be bound
/// in several spaces at once without conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingsSpace {
    /// Loaded module implementations, keyed by canonical module name.
    Module,
    /// Short name to canonical module name mappings.
    Alias,
    /// User variables declared with `set`.
    User,
    /// Named on-chain addresses.
    Addr,
    /// Interpreter-internal entries such as [`SCOPE_MODULE`].
    Other,
}

impl fmt::Display for BindingsSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BindingsSpace::Module => "module",
            BindingsSpace::Alias => "alias",
            BindingsSpace::User => "user",
            BindingsSpace::Addr => "addr",
            BindingsSpace::Other => "other",
        };
        f.write_str(s)
    }
}

/// Payload of a binding, one variant per space.
#[derive(Clone)]
pub enum BindingValue {
    /// USER space payload.
    Value(Value),
    /// ADDR space payload: a checksummed or lowercase hex address.
    Address(String),
    /// ALIAS space payload: the canonical module identifier the alias
    /// points at.
    Alias(String),
    /// MODULE space payload.
    Module(ModuleData),
    /// OTHER space payload, plain text bookkeeping.
    Text(String),
}

impl BindingValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            BindingValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            BindingValue::Address(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_alias_target(&self) -> Option<&str> {
        match self {
            BindingValue::Alias(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleData> {
        match self {
            BindingValue::Module(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BindingValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Debug for BindingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            BindingValue::Address(a) => f.debug_tuple("Address").field(a).finish(),
            BindingValue::Alias(t) => f.debug_tuple("Alias").field(t).finish(),
            BindingValue::Module(m) => f.debug_tuple("Module").field(m).finish(),
            BindingValue::Text(t) => f.debug_tuple("Text").field(t).finish(),
        }
    }
}

/// A single named entry in one space of one frame.
#[derive(Debug, Clone)]
pub struct Binding {
    pub identifier: String,
    pub value: BindingValue,
    pub space: BindingsSpace,
    /// The binding this one shadowed when it was added, if any.
    parent: Option<Box<Binding>>,
}

impl Binding {
    pub fn new(identifier: impl Into<String>, value: BindingValue, space: BindingsSpace) -> Self {
        Binding {
            identifier: identifier.into(),
            value,
            space,
            parent: None,
        }
    }

    /// The binding that was visible under this (identifier, space) pair
    /// before this one was added.
    pub fn shadowed(&self) -> Option<&Binding> {
        self.parent.as_deref()
    }
}

/// Options for [`BindingsManager::get_all_bindings`].
#[derive(Debug, Clone, Default)]
pub struct AllBindingsOpts {
    /// Restrict the walk to the current frame.
    pub only_local: bool,
    /// Keep only bindings in these spaces. Empty means all spaces.
    pub spaces: Vec<BindingsSpace>,
}

impl AllBindingsOpts {
    pub fn spaces(spaces: &[BindingsSpace]) -> Self {
        AllBindingsOpts { only_local: false, spaces: spaces.to_vec() }
    }
}

/// One scope level. Frames are stored in an arena and refer to their
/// parent by index, so handing out references to bindings never fights
/// the borrow checker when new frames are pushed.
#[derive(Debug, Default)]
struct Frame {
    symbols: BTreeMap<String, Vec<Binding>>,
    parent: Option<usize>,
}

/// The scope chain. One instance backs a whole interpretation run, in
/// either full or eager mode.
#[derive(Debug)]
pub struct BindingsManager {
    frames: Vec<Frame>,
    current: usize,
}

impl Default for BindingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingsManager {
    pub fn new() -> Self {
        BindingsManager { frames: vec![Frame::default()], current: 0 }
    }

    /// Push a child frame and make it current. The new frame records its
    /// active module: the one given, else the enclosing scope's, else
    /// [`DEFAULT_MODULE`].
    pub fn enter_scope(&mut self, module: Option<&str>) {
        let scope_module = module
            .map(str::to_owned)
            .or_else(|| self.scope_module())
            .unwrap_or_else(|| DEFAULT_MODULE.to_owned());
        let frame = Frame { symbols: BTreeMap::new(), parent: Some(self.current) };
        self.frames.push(frame);
        self.current = self.frames.len() - 1;
        self.insert(
            self.current,
            Binding::new(SCOPE_MODULE, BindingValue::Text(scope_module), BindingsSpace::Other),
        );
    }

    /// Pop the current frame. Calling this on the root frame is a no-op.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.frames[self.current].parent {
            self.frames.pop();
            self.current = parent;
        }
    }

    /// The active module of the current scope, if any frame on the chain
    /// recorded one.
    pub fn scope_module(&self) -> Option<String> {
        self.get_binding_value(SCOPE_MODULE, BindingsSpace::Other)
            .and_then(BindingValue::as_text)
            .map(str::to_owned)
    }

    /// Add a binding to the current frame, or to the root frame when
    /// `is_global` is set.
    ///
    /// Within one frame the pair (identifier, space) must be unique;
    /// a second non-global add with the same pair fails with
    /// [`EvalError::DuplicateBinding`]. Global adds bypass the check.
    pub fn set_binding(
        &mut self,
        identifier: impl Into<String>,
        value: BindingValue,
        space: BindingsSpace,
        is_global: bool,
    ) -> Result<(), EvalError> {
        let identifier = identifier.into();
        let frame = if is_global { 0 } else { self.current };
        if !is_global && self.frame_has(frame, &identifier, space) {
            return Err(EvalError::DuplicateBinding {
                identifier,
                space: space.to_string(),
            });
        }
        let parent = self.get_binding(&identifier, space).cloned().map(Box::new);
        let mut binding = Binding::new(identifier, value, space);
        binding.parent = parent;
        self.insert(frame, binding);
        Ok(())
    }

    /// Add a batch of bindings, stopping at the first failure.
    pub fn set_bindings(&mut self, bindings: Vec<Binding>, is_global: bool) -> Result<(), EvalError> {
        for b in bindings {
            self.set_binding(b.identifier, b.value, b.space, is_global)?;
        }
        Ok(())
    }

    /// Add each binding whose (identifier, space) pair is not already
    /// visible from the current scope. Never fails.
    pub fn merge_bindings(&mut self, bindings: Vec<Binding>) {
        for b in bindings {
            if !self.has_binding(&b.identifier, b.space) {
                self.insert(self.current, b);
            }
        }
    }

    /// Nearest visible binding for (identifier, space), walking from the
    /// current frame outward.
    pub fn get_binding(&self, identifier: &str, space: BindingsSpace) -> Option<&Binding> {
        let mut frame = Some(self.current);
        while let Some(idx) = frame {
            if let Some(entries) = self.frames[idx].symbols.get(identifier) {
                // Newest first: repeated global adds of the same pair are
                // allowed and the latest one wins.
                if let Some(b) = entries.iter().rev().find(|b| b.space == space) {
                    return Some(b);
                }
            }
            frame = self.frames[idx].parent;
        }
        None
    }

    pub fn get_binding_value(&self, identifier: &str, space: BindingsSpace) -> Option<&BindingValue> {
        self.get_binding(identifier, space).map(|b| &b.value)
    }

    pub fn has_binding(&self, identifier: &str, space: BindingsSpace) -> bool {
        self.get_binding(identifier, space).is_some()
    }

    /// Every binding visible from the current scope, deduplicated by
    /// shadowing: for each identifier only the nearest frame defining it
    /// contributes entries, and the space filter is applied afterwards.
    /// An identifier shadowed by a nearer frame never leaks an ancestor
    /// entry, even when the ancestor entry sits in a different space.
    pub fn get_all_bindings(&self, opts: AllBindingsOpts) -> Vec<&Binding> {
        let mut seen: BTreeMap<&str, &Vec<Binding>> = BTreeMap::new();
        let mut frame = Some(self.current);
        while let Some(idx) = frame {
            for (identifier, entries) in &self.frames[idx].symbols {
                seen.entry(identifier.as_str()).or_insert(entries);
            }
            if opts.only_local {
                break;
            }
            frame = self.frames[idx].parent;
        }
        seen.values()
            .flat_map(|entries| entries.iter())
            .filter(|b| opts.spaces.is_empty() || opts.spaces.contains(&b.space))
            .collect()
    }

    /// Identifiers of every visible binding matching the filter.
    pub fn get_all_binding_identifiers(&self, opts: AllBindingsOpts) -> Vec<String> {
        self.get_all_bindings(opts)
            .into_iter()
            .map(|b| b.identifier.clone())
            .collect()
    }

    fn frame_has(&self, frame: usize, identifier: &str, space: BindingsSpace) -> bool {
        self.frames[frame]
            .symbols
            .get(identifier)
            .is_some_and(|entries| entries.iter().any(|b| b.space == space))
    }

    fn insert(&mut self, frame: usize, binding: Binding) {
        self.frames[frame]
            .symbols
            .entry(binding.identifier.clone())
            .or_default()
            .push(binding);
    }
}
