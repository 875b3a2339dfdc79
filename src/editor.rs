//! An editing session over one [`PermissionDraft`].
//!
//! The session owns the draft, keeps the grouped view in step with every
//! change, and remembers previous permission sets so edits can be undone.
//! Nothing is persisted until [`PermissionEditor::submit`] produces the wire
//! payload, which passes through the same boundary checks as stored data.
//!
//! # Example
//!
//! ```
//! use permatrix::editor::PermissionEditor;
//! use permatrix_core::{BoundaryPolicy, Catalog, PermissionCode};
//! use permatrix_models::PermissionDraft;
//!
//! let mut editor = PermissionEditor::new(
//!     Catalog::builtin(),
//!     PermissionDraft::new("Teller", None),
//!     BoundaryPolicy::Reject,
//! );
//!
//! editor.grant(&PermissionCode::parse("member:read").unwrap()).unwrap();
//! editor.grant_row("account");
//! assert!(editor.grouped().is_granted("member", "read"));
//!
//! let submission = editor.submit().unwrap();
//! assert_eq!(submission.permissions[0], "member:read");
//! ```

use std::collections::VecDeque;

use permatrix_core::{
    BoundaryPolicy, Catalog, GroupedPermissionView, PermissionCode, PermissionSet, algebra,
    codec, wire,
};
use permatrix_models::{PermissionDraft, PermissionSubmission, PermissionTemplate};
use permatrix_observability::track_dropped_codes;
use tracing::{info, instrument};
use validator::Validate;

use crate::errors::Result;
use crate::matrix::{self, MatrixMode, MatrixRow};
use crate::resolver::{ApplyMode, TemplateResolver};

/// How many previous permission sets are kept for undo.
pub const UNDO_DEPTH: usize = 50;

#[derive(Debug, Clone)]
pub struct PermissionEditor {
    catalog: Catalog,
    policy: BoundaryPolicy,
    draft: PermissionDraft,
    grouped: GroupedPermissionView,
    history: VecDeque<PermissionSet>,
}

impl PermissionEditor {
    pub fn new(catalog: Catalog, draft: PermissionDraft, policy: BoundaryPolicy) -> Self {
        let grouped = group(&catalog, &draft.permissions);
        Self {
            catalog,
            policy,
            draft,
            grouped,
            history: VecDeque::new(),
        }
    }

    /// Open a session on persisted data.
    ///
    /// # Errors
    ///
    /// Fails like [`wire::parse`] under `policy`.
    pub fn open<I, S>(
        catalog: Catalog,
        name: impl Into<String>,
        description: Option<String>,
        stored: I,
        policy: BoundaryPolicy,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = wire::parse(&catalog, stored, policy)?;
        track_dropped_codes("stored", parsed.stripped.len());

        let draft = PermissionDraft::new(name, description).with_permissions(parsed.permissions);
        Ok(Self::new(catalog, draft, policy))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> &PermissionDraft {
        &self.draft
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.draft.permissions
    }

    pub fn grouped(&self) -> &GroupedPermissionView {
        &self.grouped
    }

    pub fn matrix(&self, mode: MatrixMode) -> Vec<MatrixRow> {
        matrix::build(&self.catalog, &self.draft.permissions, mode)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description;
    }

    /// # Errors
    ///
    /// Rejects codes the catalog does not allow; the draft is unchanged.
    pub fn grant(&mut self, code: &PermissionCode) -> Result<()> {
        let next = algebra::grant(&self.catalog, &self.draft.permissions, code)?;
        self.commit(next);
        Ok(())
    }

    pub fn revoke(&mut self, code: &PermissionCode) {
        let next = algebra::revoke(&self.draft.permissions, code);
        self.commit(next);
    }

    pub fn toggle(&mut self, code: &PermissionCode) {
        let next = algebra::toggle(&self.catalog, &self.draft.permissions, code);
        self.commit(next);
    }

    pub fn grant_row(&mut self, resource: &str) {
        let next = algebra::grant_resource(&self.catalog, &self.draft.permissions, resource);
        self.commit(next);
    }

    pub fn clear_row(&mut self, resource: &str) {
        let next = algebra::revoke_resource(&self.draft.permissions, resource);
        self.commit(next);
    }

    /// Apply a template and return its drift.
    ///
    /// In [`ApplyMode::Replace`] the name and description change too; undo
    /// only restores permissions.
    pub fn apply_template(&mut self, template: &PermissionTemplate, mode: ApplyMode) -> Vec<String> {
        let resolution = TemplateResolver::new(&self.catalog).apply(template, mode, &self.draft);
        self.draft.name = resolution.draft.name;
        self.draft.description = resolution.draft.description;
        self.commit(resolution.draft.permissions);
        resolution.drift
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Restore the previous permission set. Returns `false` with nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.grouped = group(&self.catalog, &previous);
                self.draft.permissions = previous;
                true
            }
            None => false,
        }
    }

    /// Validate the draft and produce the payload to persist.
    ///
    /// # Errors
    ///
    /// [`EditorError::Validation`](crate::EditorError::Validation) for a bad
    /// name or description. Under [`BoundaryPolicy::Reject`], any permission
    /// the catalog rejects fails the whole submission; under `Strip` it is
    /// left out.
    #[instrument(skip(self), fields(name = %self.draft.name, policy = %self.policy))]
    pub fn submit(&self) -> Result<PermissionSubmission> {
        self.draft.validate()?;

        let parsed = wire::parse(
            &self.catalog,
            self.draft.permissions.iter().map(PermissionCode::as_string),
            self.policy,
        )?;
        track_dropped_codes("submission", parsed.stripped.len());

        let submission = PermissionDraft {
            permissions: parsed.permissions,
            ..self.draft.clone()
        }
        .to_submission(&self.catalog);

        info!(granted = submission.permissions.len(), "Permission draft submitted");
        Ok(submission)
    }

    fn commit(&mut self, next: PermissionSet) {
        if next == self.draft.permissions {
            return;
        }

        let previous = std::mem::replace(&mut self.draft.permissions, next);
        self.history.push_back(previous);
        if self.history.len() > UNDO_DEPTH {
            self.history.pop_front();
        }
        self.grouped = group(&self.catalog, &self.draft.permissions);
    }
}

fn group(catalog: &Catalog, set: &PermissionSet) -> GroupedPermissionView {
    let grouped = codec::to_grouped(catalog, set);
    track_dropped_codes("grouped_view", grouped.dropped.len());
    grouped.view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EditorError;
    use permatrix_core::PermissionError;
    use permatrix_models::TemplateId;

    fn code(raw: &str) -> PermissionCode {
        PermissionCode::parse(raw).unwrap()
    }

    fn editor() -> PermissionEditor {
        PermissionEditor::new(
            Catalog::builtin(),
            PermissionDraft::new("Teller", None),
            BoundaryPolicy::Reject,
        )
    }

    #[test]
    fn grant_updates_grouped_view() {
        let mut editor = editor();
        editor.grant(&code("member:read")).unwrap();
        assert!(editor.grouped().is_granted("member", "read"));
        assert_eq!(editor.permissions().len(), 1);
    }

    #[test]
    fn rejected_grant_leaves_draft_unchanged() {
        let mut editor = editor();
        let err = editor.grant(&code("member:approve")).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Permission(PermissionError::InvalidPermissionCode { .. })
        ));
        assert!(editor.permissions().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn undo_walks_back_through_edits() {
        let mut editor = editor();
        editor.grant(&code("member:read")).unwrap();
        editor.grant_row("account");
        editor.clear_row("member");

        assert!(editor.undo());
        assert!(editor.grouped().is_granted("member", "read"));
        assert!(editor.undo());
        assert!(editor.grouped().actions("account").is_none());
        assert!(editor.undo());
        assert!(editor.permissions().is_empty());
        assert!(!editor.undo());
    }

    #[test]
    fn no_op_edits_are_not_recorded() {
        let mut editor = editor();
        editor.revoke(&code("member:read"));
        editor.toggle(&code("ghost:read"));
        assert!(!editor.can_undo());
    }

    #[test]
    fn history_is_bounded() {
        let mut editor = editor();
        for _ in 0..(UNDO_DEPTH + 10) {
            editor.toggle(&code("member:read"));
        }
        let mut undone = 0;
        while editor.undo() {
            undone += 1;
        }
        assert_eq!(undone, UNDO_DEPTH);
    }

    #[test]
    fn apply_template_replaces_draft_and_reports_drift() {
        let mut editor = editor();
        editor.grant(&code("report:read")).unwrap();
        let template = PermissionTemplate::new(
            TemplateId::from_u128(1),
            "Auditor",
            Some("Reads everything".to_string()),
            vec!["member:read".to_string(), "audit_log:read".to_string()],
        );

        let drift = editor.apply_template(&template, ApplyMode::Replace);
        assert_eq!(drift, vec!["audit_log:read"]);
        assert_eq!(editor.draft().name, "Auditor");
        assert_eq!(editor.permissions(), &PermissionSet::parse(["member:read"]).unwrap());

        assert!(editor.undo());
        assert_eq!(editor.permissions(), &PermissionSet::parse(["report:read"]).unwrap());
    }

    #[test]
    fn submit_validates_name() {
        let mut editor = editor();
        editor.set_name("");
        assert!(matches!(editor.submit(), Err(EditorError::Validation(_))));
    }

    #[test]
    fn submit_emits_canonical_wire_order() {
        let mut editor = editor();
        editor.grant(&code("report:read")).unwrap();
        editor.grant(&code("member:update")).unwrap();
        editor.grant(&code("member:read")).unwrap();

        let submission = editor.submit().unwrap();
        assert_eq!(submission.name, "Teller");
        assert_eq!(
            submission.permissions,
            vec!["member:read", "member:update", "report:read"]
        );
    }

    #[test]
    fn open_strips_stored_drift_under_strip_policy() {
        let editor = PermissionEditor::open(
            Catalog::builtin(),
            "Legacy",
            None,
            ["member:read", "ghost:read"],
            BoundaryPolicy::Strip,
        )
        .unwrap();
        assert_eq!(editor.permissions(), &PermissionSet::parse(["member:read"]).unwrap());
    }

    #[test]
    fn open_rejects_stored_drift_under_reject_policy() {
        let result = PermissionEditor::open(
            Catalog::builtin(),
            "Legacy",
            None,
            ["member:read", "ghost:read"],
            BoundaryPolicy::Reject,
        );
        assert!(matches!(result, Err(EditorError::Permission(_))));
    }

    #[test]
    fn empty_submission_is_allowed() {
        let submission = editor().submit().unwrap();
        assert!(submission.permissions.is_empty());
    }
}
