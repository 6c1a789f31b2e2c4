//! Content-addressed pool of dynamically generated style rules.
//!
//! Each distinct property set maps to one generated class name and one
//! injected style node. Leases are reference counted; releasing the last
//! lease schedules a debounced garbage-collection sweep rather than removing
//! the rule immediately, so rapid lease/release churn of identical styles
//! (hover flicker, reacquisition by another widget instance) reuses the
//! existing native style node instead of recreating it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;
use tracing::debug;

use crate::constants::{RULE_CLASS_PREFIX, STYLE_RULE_GC_DELAY};
use crate::host::{Debouncer, ElementRef, Scheduler, StyleInjector, StyleNode};
use crate::profile_scope;
use crate::style::theme::{ThemeResolver, ThemeToken};

/// Pool of instance ids, so class names never collide between cache
/// instances in the same process.
static INSTANCE_ID_POOL: AtomicU32 = AtomicU32::new(0);

/// A CSS property value: either a literal, or a theme token resolved to a
/// variable reference at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CssValue {
    Literal(String),
    Themed(ThemeToken),
}

impl CssValue {
    pub fn literal(value: impl Into<String>) -> Self {
        CssValue::Literal(value.into())
    }

    pub fn themed(token: impl Into<String>) -> Self {
        CssValue::Themed(ThemeToken::new(token))
    }
}

/// A property set, keyed by camelCase property name.
///
/// The ordered map is what makes cache keys canonical: two semantically
/// equal sets produce the same serialization regardless of insertion order.
pub type CssProperties = BTreeMap<String, CssValue>;

struct RuleEntry {
    class_name: String,
    style_node: Rc<dyn StyleNode>,
    reference_count: u32,
}

struct CacheInner {
    next_rule_id: u32,
    rules: HashMap<String, RuleEntry>,
}

/// Reference-counted, lazily garbage-collected pool of generated style
/// rules, content-addressed by canonical property-set key.
///
/// The cache exclusively owns every entry and its injected style node;
/// callers hold only a [`ClassNameLease`].
pub struct DynamicRuleCache {
    injector: Rc<dyn StyleInjector>,
    container: ElementRef,
    resolver: Rc<dyn ThemeResolver>,
    instance_id: u32,
    inner: Rc<RefCell<CacheInner>>,
    gc: Debouncer,
}

impl DynamicRuleCache {
    /// Create a cache injecting rules for the widget whose container element
    /// is `container`. When the container renders inside a shadow root,
    /// rules are scoped to it; otherwise they land in the host's default
    /// document-level style area.
    pub fn new(
        injector: Rc<dyn StyleInjector>,
        container: ElementRef,
        scheduler: Rc<dyn Scheduler>,
        resolver: Rc<dyn ThemeResolver>,
    ) -> Self {
        let inner = Rc::new(RefCell::new(CacheInner {
            next_rule_id: 0,
            rules: HashMap::new(),
        }));

        // The sweep closure captures no entry-specific state; it re-scans
        // the whole map at fire time, because leases issued after scheduling
        // may have revived an entry.
        let gc = Debouncer::new(scheduler, STYLE_RULE_GC_DELAY, {
            let inner = Rc::downgrade(&inner);
            move || {
                if let Some(inner) = inner.upgrade() {
                    Self::garbage_collect(&inner);
                }
            }
        });

        Self {
            injector,
            container,
            resolver,
            instance_id: INSTANCE_ID_POOL.fetch_add(1, Ordering::Relaxed),
            inner,
            gc,
        }
    }

    /// Lease the class name for `properties`, creating and injecting the
    /// rule on a cache miss and reusing the existing entry on a hit.
    pub fn lease_class(&self, properties: &CssProperties) -> ClassNameLease {
        let key = canonical_key(properties);

        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        let entry = match inner.rules.entry(key.clone()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let rule_id = inner.next_rule_id;
                inner.next_rule_id += 1;

                let class_name =
                    format!("{RULE_CLASS_PREFIX}-{}-{rule_id}", self.instance_id);
                let css_text = render_css_text(&class_name, properties, self.resolver.as_ref());

                let shadow_container = self
                    .container
                    .is_in_shadow_root()
                    .then(|| Rc::clone(&self.container));
                let style_node = self.injector.create_style_node(shadow_container.as_ref());
                style_node.set_text(&css_text);

                debug!(class_name = %class_name, "created dynamic style rule");
                vacant.insert(RuleEntry {
                    class_name,
                    style_node,
                    reference_count: 0,
                })
            }
        };
        entry.reference_count += 1;

        ClassNameLease {
            class_name: entry.class_name.clone(),
            key,
            cache: Rc::downgrade(&self.inner),
            gc: self.gc.clone(),
            released: false,
        }
    }

    /// Number of live (injected, not yet collected) rules.
    pub fn rule_count(&self) -> usize {
        self.inner.borrow().rules.len()
    }

    /// Current reference count of the rule for `properties`, if it exists.
    /// Diagnostic accessor.
    pub fn reference_count(&self, properties: &CssProperties) -> Option<u32> {
        let key = canonical_key(properties);
        self.inner
            .borrow()
            .rules
            .get(&key)
            .map(|entry| entry.reference_count)
    }

    /// Remove and dispose every rule whose reference count is zero right
    /// now. Runs debounced, [`STYLE_RULE_GC_DELAY`] after the last release.
    fn garbage_collect(inner: &RefCell<CacheInner>) {
        profile_scope!("style_rule_sweep");

        let mut inner = inner.borrow_mut();
        let before = inner.rules.len();
        inner.rules.retain(|_, entry| {
            if entry.reference_count == 0 {
                entry.style_node.remove();
                false
            } else {
                true
            }
        });
        debug!(
            collected = before - inner.rules.len(),
            remaining = inner.rules.len(),
            "style rule sweep"
        );
    }
}

impl Drop for DynamicRuleCache {
    fn drop(&mut self) {
        // Entries are owned by the cache; tear their nodes down with it.
        self.gc.cancel();
        for entry in self.inner.borrow().rules.values() {
            entry.style_node.remove();
        }
    }
}

/// A caller-held claim on a shared style rule.
///
/// Releasing decrements the rule's reference count and schedules - never
/// performs - garbage collection. Release is idempotent, and dropping an
/// unreleased lease releases it.
pub struct ClassNameLease {
    class_name: String,
    key: String,
    cache: Weak<RefCell<CacheInner>>,
    gc: Debouncer,
    released: bool,
}

impl ClassNameLease {
    /// The generated class name to attach to host elements.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Give the claim back. No-op on a second call.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let Some(cache) = self.cache.upgrade() else {
            return;
        };
        if let Some(entry) = cache.borrow_mut().rules.get_mut(&self.key) {
            entry.reference_count = entry.reference_count.saturating_sub(1);
        }
        self.gc.schedule();
    }
}

impl Drop for ClassNameLease {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ClassNameLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassNameLease")
            .field("class_name", &self.class_name)
            .field("released", &self.released)
            .finish()
    }
}

/// Canonical, order-independent key for a property set.
///
/// `CssProperties` iterates in lexicographic property order, so the JSON
/// serialization is deterministic no matter how the set was built.
pub fn canonical_key(properties: &CssProperties) -> String {
    // Serialization of string keys and tagged enum values cannot fail.
    serde_json::to_string(properties).unwrap_or_default()
}

/// Render the CSS text for one rule. Theme tokens resolve through
/// `resolver`; property names are camelCase and render dash-delimited.
fn render_css_text(class_name: &str, properties: &CssProperties, resolver: &dyn ThemeResolver) -> String {
    let mut css = format!(".{class_name} {{");
    for (property, value) in properties {
        let rendered = match value {
            CssValue::Literal(literal) => literal.clone(),
            CssValue::Themed(token) => resolver.css_value(token),
        };
        css.push_str(&format!("\n\t{}: {};", camel_to_dashes(property), rendered));
    }
    css.push_str("\n}");
    css
}

fn camel_to_dashes(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for (i, ch) in property.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
