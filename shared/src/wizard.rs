//! 四步问题上报向导：分类 → 位置 → 照片 → 详情
//!
//! 步骤只做整数加减，唯一的守卫是第 1 步必须先选分类。
//! 照片类型 `P` 由调用方决定（浏览器里是 `File` + 预览 URL）。

use crate::protocol::SubmitProblem;
use crate::{ProblemCategory, ProblemDetails, ProblemLocation};
use std::fmt;

pub const MAX_PHOTOS: usize = 5;
pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Category,
    Location,
    Photos,
    Details,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Category,
        WizardStep::Location,
        WizardStep::Photos,
        WizardStep::Details,
    ];

    pub fn from_number(n: u8) -> Self {
        match n {
            0 | 1 => WizardStep::Category,
            2 => WizardStep::Location,
            3 => WizardStep::Photos,
            _ => WizardStep::Details,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Category => 1,
            WizardStep::Location => 2,
            WizardStep::Photos => 3,
            WizardStep::Details => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Category => "Problem Type",
            WizardStep::Location => "Location",
            WizardStep::Photos => "Photos",
            WizardStep::Details => "Details",
        }
    }
}

// =========================================================
// 错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    TooManyPhotos,
    PhotosUnavailable,
    MissingFields(Vec<&'static str>),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::TooManyPhotos => write!(f, "Maximum {} photos allowed", MAX_PHOTOS),
            WizardError::PhotosUnavailable => {
                f.write_str("Photo upload is currently unavailable")
            }
            WizardError::MissingFields(fields) => {
                write!(f, "Please fill in: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for WizardError {}

/// 浏览器定位失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    Unsupported,
    PermissionDenied,
    Unavailable,
    Timeout,
    Unknown,
}

impl GeoError {
    /// `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::Unavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unknown,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            GeoError::Unsupported => "Geolocation is not supported by your browser",
            GeoError::PermissionDenied => "Please allow location access to use this feature",
            GeoError::Unavailable => "Location information is unavailable",
            GeoError::Timeout => "Location request timed out",
            GeoError::Unknown => "An unknown error occurred",
        }
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 高精度、5 秒超时、不使用缓存位置
pub const GEO_TIMEOUT_MS: u32 = 5000;

pub fn gps_string(latitude: f64, longitude: f64) -> String {
    format!("{},{}", latitude, longitude)
}

// =========================================================
// 向导状态
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReportWizard<P> {
    step: u8,
    pub category: Option<ProblemCategory>,
    pub location: ProblemLocation,
    pub details: ProblemDetails,
    photos: Vec<P>,
    // 没有可用的图床时关闭照片步骤
    photos_enabled: bool,
    pub gps_error: Option<GeoError>,
    pub submitted: bool,
}

impl<P> Default for ReportWizard<P> {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            category: None,
            location: ProblemLocation::default(),
            details: ProblemDetails::default(),
            photos: Vec::new(),
            photos_enabled: true,
            gps_error: None,
            submitted: false,
        }
    }
}

impl<P> ReportWizard<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 不接受照片的向导，照片步骤只显示说明
    pub fn without_photos() -> Self {
        Self {
            photos_enabled: false,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        WizardStep::from_number(self.step)
    }

    pub fn step_number(&self) -> u8 {
        self.step
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    pub fn select_category(&mut self, category: ProblemCategory) {
        self.category = Some(category);
    }

    /// "Next" 按钮是否可用
    pub fn can_advance(&self) -> bool {
        match self.step() {
            WizardStep::Category => self.category.is_some(),
            WizardStep::Details => false,
            _ => true,
        }
    }

    pub fn next(&mut self) -> WizardStep {
        if self.can_advance() {
            self.step = (self.step + 1).min(LAST_STEP);
        }
        self.step()
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
        self.step()
    }

    // --- 照片 ---

    pub fn photos(&self) -> &[P] {
        &self.photos
    }

    pub fn photos_enabled(&self) -> bool {
        self.photos_enabled
    }

    /// 整批加入；超过上限时整批拒绝，已有照片不变
    pub fn add_photos(&mut self, batch: Vec<P>) -> Result<usize, WizardError> {
        if !self.photos_enabled {
            return Err(WizardError::PhotosUnavailable);
        }
        if self.photos.len() + batch.len() > MAX_PHOTOS {
            return Err(WizardError::TooManyPhotos);
        }
        self.photos.extend(batch);
        Ok(self.photos.len())
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<P> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn take_photos(&mut self) -> Vec<P> {
        std::mem::take(&mut self.photos)
    }

    // --- 定位 ---

    pub fn set_gps(&mut self, latitude: f64, longitude: f64) {
        self.location.gps_location = gps_string(latitude, longitude);
        self.gps_error = None;
    }

    pub fn set_gps_error(&mut self, error: GeoError) {
        self.gps_error = Some(error);
    }

    // --- 提交 ---

    /// 空白的必填项，按表单顺序
    pub fn missing_required(&self) -> Vec<&'static str> {
        let checks = [
            ("Village", &self.location.village),
            ("District", &self.location.district),
            ("State", &self.location.state),
            ("Title", &self.details.title),
            ("Description", &self.details.description),
            ("Name", &self.details.name),
            ("Contact", &self.details.contact),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    pub fn validate(&self) -> Result<(), WizardError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WizardError::MissingFields(missing))
        }
    }

    /// 组装提交请求；分类同时以 `category` 和 `problemType` 发送
    pub fn to_submission(&self, images: Vec<String>) -> Result<SubmitProblem, WizardError> {
        self.validate()?;
        let category = self.category.map(|c| c.id().to_string()).unwrap_or_default();
        Ok(SubmitProblem {
            category: category.clone(),
            problem_type: category,
            location: self.location.clone(),
            details: self.details.clone(),
            images,
        })
    }

    /// 回到第 1 步，照片开关保持不变
    pub fn reset(&mut self) {
        *self = Self {
            photos_enabled: self.photos_enabled,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests;
