//! Generic plan computation.
//!
//! Turns the prior state and the configuration of a resource into the planned
//! state Terraform shows to the user, the list of attribute changes and the
//! replacement decision. Resources refine the result afterwards in
//! [`crate::resources::Resource::modify_plan`].
//!
//! Unknown values are represented as `null` in the planned state; the
//! provider fills them in during apply.

use serde_json::{Map, Value};

use crate::schema::{Block, BlockNestingMode, PlanModifier, Schema};
use crate::types::{AttributeChange, PlanResult};
use crate::validation::join_path;

/// Compute the plan for a resource.
///
/// * `prior` is `None` when the resource is being created.
/// * a `null` config means the resource is being destroyed.
pub fn plan_resource(schema: &Schema, prior: Option<&Value>, config: &Value) -> PlanResult {
    let prior = prior.filter(|p| !p.is_null());

    if config.is_null() {
        let changes = prior
            .map(|p| removed_changes(&schema.block, p))
            .unwrap_or_default();
        return PlanResult::with_changes(Value::Null, changes, false);
    }

    let mut planned = plan_block(&schema.block, prior, config);

    let mut changes = Vec::new();
    diff_block(
        &schema.block,
        prior.unwrap_or(&Value::Null),
        &planned,
        "",
        &mut changes,
    );

    if changes.is_empty() {
        return PlanResult::no_change(planned);
    }

    let requires_replace = match prior {
        Some(prior) => block_requires_replace(&schema.block, prior, &planned, config),
        None => false,
    };

    if prior.is_some() {
        mark_unknown(&schema.block, config, &mut planned);
    }

    PlanResult::with_changes(planned, changes, requires_replace)
}

fn configured<'a>(config: &'a Value, name: &str) -> Option<&'a Value> {
    config.get(name).filter(|v| !v.is_null())
}

fn plan_block(block: &Block, prior: Option<&Value>, config: &Value) -> Value {
    let mut planned = Map::new();

    for (name, attr) in &block.attributes {
        let value = match configured(config, name) {
            Some(v) if !attr.flags.is_computed_only() => v.clone(),
            _ if attr.flags.computed => prior
                .and_then(|p| p.get(name))
                .cloned()
                .unwrap_or(Value::Null),
            _ => Value::Null,
        };
        planned.insert(name.clone(), value);
    }

    for (name, nested) in &block.blocks {
        let prior_value = prior.and_then(|p| p.get(name)).filter(|v| !v.is_null());

        let value = if nested.computed {
            prior_value.cloned().unwrap_or(Value::Null)
        } else {
            match (nested.nesting_mode, configured(config, name)) {
                (_, None) => Value::Null,
                (BlockNestingMode::Single, Some(c)) => plan_block(&nested.block, prior_value, c),
                (BlockNestingMode::List, Some(Value::Array(items))) => Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            plan_block(&nested.block, prior_value.and_then(|p| p.get(i)), item)
                        })
                        .collect(),
                ),
                (BlockNestingMode::List, Some(other)) => other.clone(),
            }
        };
        planned.insert(name.clone(), value);
    }

    Value::Object(planned)
}

fn diff_block(
    block: &Block,
    before: &Value,
    after: &Value,
    path: &str,
    changes: &mut Vec<AttributeChange>,
) {
    for name in block.attributes.keys() {
        let b = before.get(name).unwrap_or(&Value::Null);
        let a = after.get(name).unwrap_or(&Value::Null);
        push_change(join_path(path, name), b, a, changes);
    }

    for (name, nested) in &block.blocks {
        let block_path = join_path(path, name);
        let b = before.get(name).unwrap_or(&Value::Null);
        let a = after.get(name).unwrap_or(&Value::Null);

        match (nested.nesting_mode, b, a) {
            (BlockNestingMode::Single, Value::Object(_), Value::Object(_)) => {
                diff_block(&nested.block, b, a, &block_path, changes)
            },
            (BlockNestingMode::List, Value::Array(bs), Value::Array(items))
                if bs.len() == items.len() =>
            {
                for (i, (b, a)) in bs.iter().zip(items).enumerate() {
                    diff_block(
                        &nested.block,
                        b,
                        a,
                        &format!("{}.{}", block_path, i),
                        changes,
                    );
                }
            },
            _ => push_change(block_path, b, a, changes),
        }
    }
}

fn push_change(path: String, before: &Value, after: &Value, changes: &mut Vec<AttributeChange>) {
    if before == after {
        return;
    }
    let change = match (before.is_null(), after.is_null()) {
        (true, false) => AttributeChange::added(path, after.clone()),
        (false, true) => AttributeChange::removed(path, before.clone()),
        _ => AttributeChange::modified(path, before.clone(), after.clone()),
    };
    changes.push(change);
}

fn removed_changes(block: &Block, prior: &Value) -> Vec<AttributeChange> {
    block
        .attributes
        .keys()
        .chain(block.blocks.keys())
        .filter_map(|name| {
            prior
                .get(name)
                .filter(|v| !v.is_null())
                .map(|v| AttributeChange::removed(name.clone(), v.clone()))
        })
        .collect()
}

fn block_requires_replace(block: &Block, before: &Value, after: &Value, config: &Value) -> bool {
    for (name, attr) in &block.attributes {
        let b = before.get(name).unwrap_or(&Value::Null);
        let a = after.get(name).unwrap_or(&Value::Null);
        if b == a {
            continue;
        }
        let replace = attr.plan_modifiers.iter().any(|modifier| match modifier {
            PlanModifier::RequiresReplace => true,
            PlanModifier::RequiresReplaceIfConfigured => configured(config, name).is_some(),
            _ => false,
        });
        if replace {
            return true;
        }
    }

    for (name, nested) in &block.blocks {
        let b = before.get(name).unwrap_or(&Value::Null);
        let a = after.get(name).unwrap_or(&Value::Null);
        let c = config.get(name).unwrap_or(&Value::Null);
        if b == a {
            continue;
        }
        if nested.plan_modifiers.contains(&PlanModifier::RequiresReplace) {
            return true;
        }
        if nested
            .plan_modifiers
            .contains(&PlanModifier::RequiresReplaceIfRemoved)
            && !b.is_null()
            && a.is_null()
        {
            return true;
        }

        let nested_replace = match (nested.nesting_mode, b, a) {
            (BlockNestingMode::Single, Value::Object(_), Value::Object(_)) => {
                block_requires_replace(&nested.block, b, a, c)
            },
            (BlockNestingMode::List, Value::Array(bs), Value::Array(items))
                if bs.len() == items.len() =>
            {
                bs.iter().zip(items).enumerate().any(|(i, (b, a))| {
                    block_requires_replace(&nested.block, b, a, c.get(i).unwrap_or(&Value::Null))
                })
            },
            _ => false,
        };
        if nested_replace {
            return true;
        }
    }

    false
}

fn mark_unknown(block: &Block, config: &Value, planned: &mut Value) {
    let Value::Object(planned) = planned else {
        return;
    };

    for (name, attr) in &block.attributes {
        if !attr.flags.computed
            || configured(config, name).is_some()
            || attr.has_plan_modifier(PlanModifier::UseStateForUnknown)
        {
            continue;
        }
        planned.insert(name.clone(), Value::Null);
    }

    for (name, nested) in &block.blocks {
        if nested.computed {
            if !nested
                .plan_modifiers
                .contains(&PlanModifier::UseStateForUnknown)
            {
                planned.insert(name.clone(), Value::Null);
            }
            continue;
        }

        let Some(c) = configured(config, name) else {
            continue;
        };
        let Some(value) = planned.get_mut(name) else {
            continue;
        };
        match (nested.nesting_mode, value) {
            (BlockNestingMode::Single, value) => mark_unknown(&nested.block, c, value),
            (BlockNestingMode::List, Value::Array(items)) => {
                for (i, item) in items.iter_mut().enumerate() {
                    mark_unknown(&nested.block, c.get(i).unwrap_or(&Value::Null), item);
                }
            },
            _ => {},
        }
    }
}
