//! Dynamic style-rule cache tests: sharing, deferred collection, revival,
//! and rendered output.

use std::rc::Rc;
use std::time::Duration;

use glasspane::host::{Element, Scheduler, StyleInjector};
use glasspane::style::rules::{CssValue, DynamicRuleCache, canonical_key};
use glasspane::style::theme::{CssVariableResolver, ThemeResolver};

use crate::helpers::{FakeElement, FakeScheduler, FakeStyleHost, props};

const GC_DELAY: Duration = Duration::from_millis(1000);

struct StyleFixture {
    scheduler: Rc<FakeScheduler>,
    host: Rc<FakeStyleHost>,
    container: Rc<FakeElement>,
    cache: DynamicRuleCache,
}

impl StyleFixture {
    fn new() -> Self {
        let scheduler = FakeScheduler::new();
        let host = FakeStyleHost::new();
        let container = FakeElement::unscaled(0.0, 0.0, 800.0, 600.0);
        let cache = DynamicRuleCache::new(
            Rc::clone(&host) as Rc<dyn StyleInjector>,
            Rc::clone(&container) as _,
            Rc::clone(&scheduler) as Rc<dyn Scheduler>,
            Rc::new(CssVariableResolver::default()) as Rc<dyn ThemeResolver>,
        );
        Self {
            scheduler,
            host,
            container,
            cache,
        }
    }
}

#[test]
fn test_equal_property_sets_share_one_rule_regardless_of_order() {
    let fixture = StyleFixture::new();
    let forward = props(&[
        ("backgroundColor", CssValue::literal("#1e1e1e")),
        ("color", CssValue::literal("#d4d4d4")),
    ]);
    let reverse = props(&[
        ("color", CssValue::literal("#d4d4d4")),
        ("backgroundColor", CssValue::literal("#1e1e1e")),
    ]);

    let first = fixture.cache.lease_class(&forward);
    let second = fixture.cache.lease_class(&reverse);

    assert_eq!(first.class_name(), second.class_name());
    assert_eq!(fixture.cache.reference_count(&forward), Some(2));
    assert_eq!(fixture.cache.rule_count(), 1);
    assert_eq!(fixture.host.live_node_count(), 1);
}

#[test]
fn test_distinct_property_sets_get_distinct_rules() {
    let fixture = StyleFixture::new();
    let red = props(&[("color", CssValue::literal("red"))]);
    let blue = props(&[("color", CssValue::literal("blue"))]);

    let first = fixture.cache.lease_class(&red);
    let second = fixture.cache.lease_class(&blue);

    assert_ne!(first.class_name(), second.class_name());
    assert_eq!(fixture.cache.rule_count(), 2);
    assert_eq!(fixture.host.live_node_count(), 2);
}

#[test]
fn test_release_defers_removal_until_the_sweep() {
    let fixture = StyleFixture::new();
    let properties = props(&[("cursor", CssValue::literal("col-resize"))]);

    let mut first = fixture.cache.lease_class(&properties);
    let mut second = fixture.cache.lease_class(&properties);
    first.release();
    second.release();

    // Zero references, but the rule survives until the debounced sweep.
    assert_eq!(fixture.cache.reference_count(&properties), Some(0));
    assert_eq!(fixture.host.live_node_count(), 1);

    fixture.scheduler.advance(GC_DELAY);
    assert_eq!(fixture.cache.rule_count(), 0);
    assert_eq!(fixture.host.live_node_count(), 0);
}

#[test]
fn test_release_is_idempotent() {
    let fixture = StyleFixture::new();
    let properties = props(&[("opacity", CssValue::literal("0.5"))]);

    let mut first = fixture.cache.lease_class(&properties);
    let _second = fixture.cache.lease_class(&properties);
    first.release();
    first.release();

    // The double release must not steal the surviving lease's reference.
    assert_eq!(fixture.cache.reference_count(&properties), Some(1));
    fixture.scheduler.advance(GC_DELAY);
    assert_eq!(fixture.cache.rule_count(), 1);
}

#[test]
fn test_dropping_a_lease_releases_it() {
    let fixture = StyleFixture::new();
    let properties = props(&[("outline", CssValue::literal("none"))]);

    {
        let _lease = fixture.cache.lease_class(&properties);
        assert_eq!(fixture.cache.reference_count(&properties), Some(1));
    }
    assert_eq!(fixture.cache.reference_count(&properties), Some(0));

    fixture.scheduler.advance(GC_DELAY);
    assert_eq!(fixture.cache.rule_count(), 0);
}

#[test]
fn test_release_within_the_grace_period_revives_the_rule() {
    let fixture = StyleFixture::new();
    let properties = props(&[("fontWeight", CssValue::literal("bold"))]);

    let original_class = {
        let mut lease = fixture.cache.lease_class(&properties);
        let class = lease.class_name().to_string();
        lease.release();
        class
    };

    // Reacquired halfway through the grace period: the sweep still fires,
    // but must spare the revived rule.
    fixture.scheduler.advance(GC_DELAY / 2);
    let revived = fixture.cache.lease_class(&properties);
    assert_eq!(revived.class_name(), original_class);

    fixture.scheduler.advance(GC_DELAY * 2);
    assert_eq!(fixture.cache.rule_count(), 1);
    assert_eq!(fixture.host.live_node_count(), 1);
    assert_eq!(fixture.host.nodes().len(), 1, "native node was reused, not recreated");
}

#[test]
fn test_each_release_resets_the_sweep_countdown() {
    let fixture = StyleFixture::new();
    let first_props = props(&[("color", CssValue::literal("red"))]);
    let second_props = props(&[("color", CssValue::literal("blue"))]);

    let mut first = fixture.cache.lease_class(&first_props);
    let mut second = fixture.cache.lease_class(&second_props);

    first.release();
    fixture.scheduler.advance(Duration::from_millis(900));
    second.release();

    // 1100ms after the first release, but only 200ms after the last one.
    fixture.scheduler.advance(Duration::from_millis(200));
    assert_eq!(fixture.cache.rule_count(), 2);

    fixture.scheduler.advance(GC_DELAY);
    assert_eq!(fixture.cache.rule_count(), 0);
}

#[test]
fn test_rendered_rule_resolves_theme_tokens() {
    let fixture = StyleFixture::new();
    let properties = props(&[
        ("backgroundColor", CssValue::themed("editor.background")),
        ("color", CssValue::literal("#d4d4d4")),
    ]);

    let lease = fixture.cache.lease_class(&properties);
    let nodes = fixture.host.nodes();
    assert_eq!(nodes.len(), 1);
    assert_eq!(
        *nodes[0].text.borrow(),
        format!(
            ".{} {{\n\tbackground-color: var(--theme-editor-background);\n\tcolor: #d4d4d4;\n}}",
            lease.class_name()
        )
    );
}

#[test]
fn test_canonical_key_shape() {
    let properties = props(&[
        ("color", CssValue::literal("#fff")),
        ("backgroundColor", CssValue::themed("editor.background")),
    ]);

    insta::assert_snapshot!(
        canonical_key(&properties),
        @r##"{"backgroundColor":{"Themed":"editor.background"},"color":{"Literal":"#fff"}}"##
    );
}

#[test]
fn test_shadow_root_container_scopes_the_style_node() {
    let fixture = StyleFixture::new();
    fixture.container.set_in_shadow_root(true);

    let _lease = fixture
        .cache
        .lease_class(&props(&[("color", CssValue::literal("red"))]));

    let nodes = fixture.host.nodes();
    assert_eq!(nodes[0].container, Some(fixture.container.node_id()));
}

#[test]
fn test_document_level_container_is_unscoped() {
    let fixture = StyleFixture::new();

    let _lease = fixture
        .cache
        .lease_class(&props(&[("color", CssValue::literal("red"))]));

    assert_eq!(fixture.host.nodes()[0].container, None);
}

#[test]
fn test_dropping_the_cache_removes_every_node() {
    let fixture = StyleFixture::new();
    let _red = fixture
        .cache
        .lease_class(&props(&[("color", CssValue::literal("red"))]));
    let _blue = fixture
        .cache
        .lease_class(&props(&[("color", CssValue::literal("blue"))]));
    assert_eq!(fixture.host.live_node_count(), 2);

    drop(fixture.cache);
    assert_eq!(fixture.host.live_node_count(), 0);
}
