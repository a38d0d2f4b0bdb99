//! Collapsing of grouped code-action stubs into deferred display actions.
//!
//! A single pass walks the decoded result list in order. Resolved actions
//! and bare commands pass through. Every stub becomes an action whose only
//! invocation is [`RESOLVE_CODE_ACTION_COMMAND`], so no edit is computed until
//! the user picks it. Stubs sharing a `group` tag reserve one output slot at
//! the tag's first occurrence; after the pass a group with a single member is
//! unwrapped into that slot and larger groups become one composite action
//! invoking [`APPLY_ACTION_GROUP_COMMAND`].

use indexmap::IndexMap;
use lsp_types::{CodeActionParams, Command};
use serde_json::Value;
use tracing::debug;

use crate::CLIENT_TARGET;
use crate::decode::{CodeActionStub, RawCodeAction};
use crate::display::DisplayAction;
use crate::protocol::{
    APPLY_ACTION_GROUP_COMMAND, ActionGroupEntry, RESOLVE_CODE_ACTION_COMMAND,
    ResolveCodeActionParams,
};

/// Members collected for one group tag during a pass.
#[derive(Debug)]
struct GroupEntry {
    index: usize,
    members: Vec<DisplayAction>,
}

/// Rewrites a decoded result list into display actions.
///
/// `params` is the request that produced `actions`; each stub's resolve
/// invocation carries it alongside the stub's id.
pub fn group_code_actions(
    params: &CodeActionParams,
    actions: Vec<RawCodeAction>,
) -> Result<Vec<DisplayAction>, serde_json::Error> {
    let mut slots: Vec<Option<DisplayAction>> = Vec::with_capacity(actions.len());
    let mut groups: IndexMap<String, GroupEntry> = IndexMap::new();

    for action in actions {
        match action {
            RawCodeAction::Action(action) => slots.push(Some(DisplayAction::from(action))),
            RawCodeAction::Command(command) => slots.push(Some(DisplayAction::from(command))),
            RawCodeAction::Stub(stub) => {
                let group = stub.group.clone();
                let deferred = deferred_action(params, stub)?;
                match group {
                    Some(tag) => {
                        let entry = groups.entry(tag).or_insert_with(|| {
                            let index = slots.len();
                            slots.push(None);
                            GroupEntry {
                                index,
                                members: Vec::new(),
                            }
                        });
                        entry.members.push(deferred);
                    }
                    None => slots.push(Some(deferred)),
                }
            }
        }
    }

    let group_count = groups.len();
    for (tag, entry) in groups {
        let collapsed = collapse_group(tag, entry.members)?;
        if let Some(slot) = slots.get_mut(entry.index) {
            *slot = collapsed;
        }
    }

    let output: Vec<DisplayAction> = slots.into_iter().flatten().collect();
    debug!(
        target: CLIENT_TARGET,
        actions = output.len(),
        groups = group_count,
        "grouped code actions"
    );
    Ok(output)
}

fn deferred_action(
    params: &CodeActionParams,
    stub: CodeActionStub,
) -> Result<DisplayAction, serde_json::Error> {
    let arguments = serde_json::to_value(ResolveCodeActionParams {
        id: stub.id,
        code_action_params: params.clone(),
    })?;
    let command = Command::new(
        stub.title.clone(),
        RESOLVE_CODE_ACTION_COMMAND.to_owned(),
        Some(vec![arguments]),
    );
    Ok(DisplayAction {
        diagnostics: stub.diagnostics.unwrap_or_default(),
        ..DisplayAction::with_command(stub.title, stub.kind, command)
    })
}

fn collapse_group(
    tag: String,
    mut members: Vec<DisplayAction>,
) -> Result<Option<DisplayAction>, serde_json::Error> {
    if members.len() <= 1 {
        return Ok(members.pop());
    }

    let kind = members.first().and_then(|first| first.kind.clone());
    let entries: Vec<ActionGroupEntry> = members
        .into_iter()
        .map(|member| ActionGroupEntry {
            arguments: member.first_argument().cloned().unwrap_or(Value::Null),
            label: member.title,
        })
        .collect();
    let command = Command::new(
        tag.clone(),
        APPLY_ACTION_GROUP_COMMAND.to_owned(),
        Some(vec![serde_json::to_value(entries)?]),
    );
    Ok(Some(DisplayAction::with_command(tag, kind, command)))
}
