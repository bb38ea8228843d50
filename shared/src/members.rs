//! 成员审批队列
//!
//! 状态只能单向流转：pending → approved / rejected，没有撤销。

use crate::error::{ApiError, ApiResult};
use crate::{AdminProfile, MemberStatus};

/// 行内可执行的审批动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Approve,
    Reject,
}

impl MemberAction {
    pub fn target(&self) -> MemberStatus {
        match self {
            MemberAction::Approve => MemberStatus::Approved,
            MemberAction::Reject => MemberStatus::Rejected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemberAction::Approve => "Approve",
            MemberAction::Reject => "Reject",
        }
    }
}

impl MemberStatus {
    /// 只有待审批的行才渲染操作按钮
    pub fn actions(&self) -> &'static [MemberAction] {
        match self {
            MemberStatus::Pending => &[MemberAction::Approve, MemberAction::Reject],
            MemberStatus::Approved | MemberStatus::Rejected => &[],
        }
    }

    pub fn filter_label(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "Pending Approval",
            MemberStatus::Approved => "Approved",
            MemberStatus::Rejected => "Rejected",
        }
    }
}

/// 校验状态流转
pub fn transition(from: MemberStatus, to: MemberStatus) -> ApiResult<MemberStatus> {
    match (from, to) {
        (MemberStatus::Pending, MemberStatus::Approved | MemberStatus::Rejected) => Ok(to),
        _ => Err(ApiError::invalid_input(format!(
            "Member status cannot change from {} to {}",
            from, to
        ))
        .in_op("members.transition")),
    }
}

/// 成员列表查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub status: MemberStatus,
    /// 区级管理员只看到本区成员
    pub district: Option<String>,
}

impl MemberFilter {
    pub fn for_admin(admin: Option<&AdminProfile>) -> Self {
        Self {
            status: MemberStatus::Pending,
            district: admin
                .and_then(|a| a.district.clone())
                .filter(|d| !d.trim().is_empty()),
        }
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_rows_have_actions() {
        assert_eq!(
            MemberStatus::Pending.actions(),
            &[MemberAction::Approve, MemberAction::Reject]
        );
        assert!(MemberStatus::Approved.actions().is_empty());
        assert!(MemberStatus::Rejected.actions().is_empty());
    }

    #[test]
    fn transitions_are_one_way() {
        assert_eq!(
            transition(MemberStatus::Pending, MemberStatus::Approved).unwrap(),
            MemberStatus::Approved
        );
        assert!(transition(MemberStatus::Pending, MemberStatus::Rejected).is_ok());
        assert!(transition(MemberStatus::Approved, MemberStatus::Pending).is_err());
        assert!(transition(MemberStatus::Rejected, MemberStatus::Approved).is_err());
        assert!(transition(MemberStatus::Pending, MemberStatus::Pending).is_err());
    }

    #[test]
    fn action_targets() {
        assert_eq!(MemberAction::Approve.target(), MemberStatus::Approved);
        assert_eq!(MemberAction::Reject.target(), MemberStatus::Rejected);
    }

    #[test]
    fn filter_scopes_to_admin_district() {
        let admin = AdminProfile {
            username: "guntur".into(),
            role: "district".into(),
            district: Some("Guntur".into()),
            constituency: None,
        };
        let filter = MemberFilter::for_admin(Some(&admin));
        assert_eq!(filter.status, MemberStatus::Pending);
        assert_eq!(filter.district.as_deref(), Some("Guntur"));

        let blank = AdminProfile {
            district: Some("  ".into()),
            ..admin
        };
        assert_eq!(MemberFilter::for_admin(Some(&blank)).district, None);
        assert_eq!(
            MemberFilter::for_admin(None)
                .with_status(MemberStatus::Rejected)
                .status,
            MemberStatus::Rejected
        );
    }
}
