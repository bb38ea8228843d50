//! 管理端项目看板
//!
//! 服务器返回全部项目，筛选、计数与分页都在内存中完成。
//! 状态变更只在 PATCH 返回 2xx 之后写入本地列表，因此无需回滚。

use crate::paginate::Page;
use crate::{Project, ProjectStatus};
use std::collections::BTreeSet;

/// 大小写不敏感的子串筛选，空字符串表示不筛选
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub mandal: String,
    pub constituency: String,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        contains_ci(&project.mandal, &self.mandal)
            && contains_ci(&project.constituency, &self.constituency)
    }

    pub fn is_empty(&self) -> bool {
        self.mandal.trim().is_empty() && self.constituency.trim().is_empty()
    }
}

/// 按状态统计的数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub solved: usize,
}

impl StatusCounts {
    pub fn tally<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |mut acc, project| {
                acc.total += 1;
                match project.status {
                    ProjectStatus::Pending => acc.pending += 1,
                    ProjectStatus::InProgress => acc.in_progress += 1,
                    ProjectStatus::Solved => acc.solved += 1,
                }
                acc
            })
    }

    pub fn get(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Pending => self.pending,
            ProjectStatus::InProgress => self.in_progress,
            ProjectStatus::Solved => self.solved,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectBoard {
    projects: Vec<Project>,
    filter: ProjectFilter,
    page: usize,
    // 正在修改状态的项目 id，同一时间只允许一个
    updating: Option<String>,
}

impl Default for ProjectBoard {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProjectBoard {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            filter: ProjectFilter::default(),
            page: 1,
            updating: None,
        }
    }

    /// 重新加载列表后保留筛选条件，页码夹紧到有效范围
    pub fn replace(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.page = self.page().current;
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter(&self) -> &ProjectFilter {
        &self.filter
    }

    pub fn set_mandal_filter(&mut self, value: impl Into<String>) {
        self.filter.mandal = value.into();
        self.page = 1;
    }

    pub fn set_constituency_filter(&mut self, value: impl Into<String>) {
        self.filter.constituency = value.into();
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filter = ProjectFilter::default();
        self.page = 1;
    }

    pub fn filtered(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| self.filter.matches(p))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.projects.iter().filter(|p| self.filter.matches(p)))
    }

    pub fn page(&self) -> Page {
        Page::of(self.filtered().len(), self.page)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = Page::of(self.filtered().len(), page).current;
    }

    /// 当前页可见的项目
    pub fn visible(&self) -> Vec<Project> {
        let filtered = self.filtered();
        self.page()
            .slice(&filtered)
            .iter()
            .map(|p| (*p).clone())
            .collect()
    }

    /// 只修改 id 匹配的项目，返回是否命中
    pub fn apply_status(&mut self, id: &str, status: ProjectStatus) -> bool {
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                project.status = status;
                true
            }
            None => false,
        }
    }

    pub fn status_of(&self, id: &str) -> Option<ProjectStatus> {
        self.projects.iter().find(|p| p.id == id).map(|p| p.status)
    }

    pub fn is_updating(&self) -> bool {
        self.updating.is_some()
    }

    /// 占用状态修改；已有请求在途时返回 false
    pub fn begin_status_update(&mut self, id: &str) -> bool {
        if self.updating.is_some() {
            return false;
        }
        self.updating = Some(id.to_string());
        true
    }

    /// 结束状态修改；`applied` 为服务器确认的新状态，失败时为 `None`，列表保持原值
    pub fn finish_status_update(&mut self, id: &str, applied: Option<ProjectStatus>) {
        if self.updating.as_deref() == Some(id) {
            self.updating = None;
        }
        if let Some(status) = applied {
            self.apply_status(id, status);
        }
    }

    /// 删除恰好一条匹配记录，并夹紧页码
    pub fn remove(&mut self, id: &str) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        let removed = self.projects.remove(index);
        self.page = self.page().current;
        Some(removed)
    }

    pub fn insert(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    pub fn mandal_options(&self) -> Vec<String> {
        distinct(self.projects.iter().map(|p| p.mandal.as_str()))
    }

    pub fn constituency_options(&self) -> Vec<String> {
        distinct(self.projects.iter().map(|p| p.constituency.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests;
