/// 每页固定条数
pub const PAGE_SIZE: usize = 10;

/// 一次分页计算的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 当前页（从 1 开始，已夹紧到有效范围）
    pub current: usize,
    /// `ceil(total / PAGE_SIZE)`，空列表为 0
    pub page_count: usize,
    pub total: usize,
    /// 切片起点（含）
    pub start: usize,
    /// 切片终点（不含）
    pub end: usize,
}

impl Page {
    pub fn of(total: usize, requested: usize) -> Self {
        let page_count = total.div_ceil(PAGE_SIZE);
        let current = requested.clamp(1, page_count.max(1));
        let start = ((current - 1) * PAGE_SIZE).min(total);
        let end = (start + PAGE_SIZE).min(total);
        Self {
            current,
            page_count,
            total,
            start,
            end,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.page_count
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    /// `Showing a-b of n`
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "Showing 0-0 of 0".to_string();
        }
        format!("Showing {}-{} of {}", self.start + 1, self.end, self.total)
    }

    /// 分页控件上显示的页码 `1..=page_count`
    pub fn numbers(&self) -> impl Iterator<Item = usize> + use<> {
        1..=self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(Page::of(0, 1).page_count, 0);
        assert_eq!(Page::of(1, 1).page_count, 1);
        assert_eq!(Page::of(10, 1).page_count, 1);
        assert_eq!(Page::of(11, 1).page_count, 2);
        assert_eq!(Page::of(95, 1).page_count, 10);
    }

    #[test]
    fn requested_page_is_clamped() {
        assert_eq!(Page::of(25, 0).current, 1);
        assert_eq!(Page::of(25, 9).current, 3);
        assert_eq!(Page::of(0, 4).current, 1);
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (1..=25).collect();
        let page = Page::of(items.len(), 3);
        assert_eq!(page.slice(&items), &[21, 22, 23, 24, 25]);
        assert_eq!(page.label(), "Showing 21-25 of 25");
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_list_label() {
        let page = Page::of(0, 1);
        assert_eq!(page.label(), "Showing 0-0 of 0");
        assert!(page.slice::<u8>(&[]).is_empty());
        assert!(!page.has_next());
        assert_eq!(page.numbers().count(), 0);
    }
}
