//! Built-in permission catalog and permission code constants.
//!
//! This module provides centralized permission string constants for use across
//! the codebase, and the resource/action definitions from which
//! [`Catalog::builtin`](crate::Catalog::builtin) is assembled. Using these
//! constants instead of string literals keeps hosts and the catalog in sync.
//!
//! # Example
//!
//! ```
//! use permatrix_core::{Catalog, PermissionCode, permissions};
//!
//! let catalog = Catalog::builtin();
//! let code = PermissionCode::parse(permissions::MEMBER_READ).unwrap();
//! assert!(catalog.is_valid(&code));
//! ```

/// Version string of the built-in catalog.
pub const BUILTIN_CATALOG_VERSION: &str = "2024.1";

// =============================================================================
// Actions
// =============================================================================

pub const CREATE: &str = "create";
pub const READ: &str = "read";
pub const UPDATE: &str = "update";
pub const DELETE: &str = "delete";
pub const EXPORT: &str = "export";
pub const APPROVE: &str = "approve";

/// A built-in action verb with its human-facing label and description.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinAction {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// A built-in resource with the actions it accepts, in display order.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinResource {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub actions: &'static [&'static str],
}

pub const ACTIONS: &[BuiltinAction] = &[
    BuiltinAction {
        key: CREATE,
        label: "Create",
        description: "Add new records",
    },
    BuiltinAction {
        key: READ,
        label: "View",
        description: "View and list records",
    },
    BuiltinAction {
        key: UPDATE,
        label: "Edit",
        description: "Modify existing records",
    },
    BuiltinAction {
        key: DELETE,
        label: "Delete",
        description: "Permanently remove records",
    },
    BuiltinAction {
        key: EXPORT,
        label: "Export",
        description: "Download records as files",
    },
    BuiltinAction {
        key: APPROVE,
        label: "Approve",
        description: "Approve or reject pending records",
    },
];

const CRUD: &[&str] = &[CREATE, READ, UPDATE, DELETE];
const CRUD_EXPORT: &[&str] = &[CREATE, READ, UPDATE, DELETE, EXPORT];

pub const RESOURCES: &[BuiltinResource] = &[
    BuiltinResource {
        key: "organization",
        label: "Organization",
        description: "Organization profile and settings",
        actions: &[READ, UPDATE],
    },
    BuiltinResource {
        key: "branch",
        label: "Branches",
        description: "Branch offices of the organization",
        actions: CRUD,
    },
    BuiltinResource {
        key: "member",
        label: "Members",
        description: "Member records and profiles",
        actions: CRUD_EXPORT,
    },
    BuiltinResource {
        key: "account",
        label: "Accounts",
        description: "Member accounts and balances",
        actions: CRUD_EXPORT,
    },
    BuiltinResource {
        key: "transaction",
        label: "Transactions",
        description: "Deposits, withdrawals, and transfers",
        actions: &[CREATE, READ, EXPORT, APPROVE],
    },
    BuiltinResource {
        key: "user_organization",
        label: "Team Members",
        description: "Users who belong to the organization and their roles",
        actions: CRUD,
    },
    BuiltinResource {
        key: "permission_template",
        label: "Permission Templates",
        description: "Reusable named permission sets",
        actions: CRUD,
    },
    BuiltinResource {
        key: "report",
        label: "Reports",
        description: "Financial and activity reports",
        actions: &[READ, EXPORT],
    },
];

// =============================================================================
// Organization permissions
// =============================================================================

/// Permission to view the organization profile
pub const ORGANIZATION_READ: &str = "organization:read";
/// Permission to change organization settings
pub const ORGANIZATION_UPDATE: &str = "organization:update";

// =============================================================================
// Branch permissions
// =============================================================================

pub const BRANCH_CREATE: &str = "branch:create";
pub const BRANCH_READ: &str = "branch:read";
pub const BRANCH_UPDATE: &str = "branch:update";
pub const BRANCH_DELETE: &str = "branch:delete";

// =============================================================================
// Member permissions
// =============================================================================

/// Permission to create members
pub const MEMBER_CREATE: &str = "member:create";
/// Permission to read members
pub const MEMBER_READ: &str = "member:read";
/// Permission to update members
pub const MEMBER_UPDATE: &str = "member:update";
/// Permission to delete members
pub const MEMBER_DELETE: &str = "member:delete";
/// Permission to export member lists
pub const MEMBER_EXPORT: &str = "member:export";

// =============================================================================
// Account permissions
// =============================================================================

pub const ACCOUNT_CREATE: &str = "account:create";
pub const ACCOUNT_READ: &str = "account:read";
pub const ACCOUNT_UPDATE: &str = "account:update";
pub const ACCOUNT_DELETE: &str = "account:delete";
pub const ACCOUNT_EXPORT: &str = "account:export";

// =============================================================================
// Transaction permissions
// =============================================================================

pub const TRANSACTION_CREATE: &str = "transaction:create";
pub const TRANSACTION_READ: &str = "transaction:read";
pub const TRANSACTION_EXPORT: &str = "transaction:export";
/// Permission to approve pending transactions
pub const TRANSACTION_APPROVE: &str = "transaction:approve";

// =============================================================================
// Team member permissions
// =============================================================================

pub const USER_ORGANIZATION_CREATE: &str = "user_organization:create";
pub const USER_ORGANIZATION_READ: &str = "user_organization:read";
pub const USER_ORGANIZATION_UPDATE: &str = "user_organization:update";
pub const USER_ORGANIZATION_DELETE: &str = "user_organization:delete";

// =============================================================================
// Permission template permissions
// =============================================================================

pub const PERMISSION_TEMPLATE_CREATE: &str = "permission_template:create";
pub const PERMISSION_TEMPLATE_READ: &str = "permission_template:read";
pub const PERMISSION_TEMPLATE_UPDATE: &str = "permission_template:update";
pub const PERMISSION_TEMPLATE_DELETE: &str = "permission_template:delete";

// =============================================================================
// Report permissions
// =============================================================================

pub const REPORT_READ: &str = "report:read";
pub const REPORT_EXPORT: &str = "report:export";
