//! 笔刷请求
//!
//! 位置为世界坐标，半径为高度图边长的比例（归一化单位）。

use crate::brush::PatchImage;
use serde::{Deserialize, Serialize};

/// 圆形挖掘请求
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleRequest {
    pub position: [f32; 2],
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub weight: f32,
}

impl CircleRequest {
    pub fn new(position: [f32; 2], outer_radius: f32, inner_radius: f32, weight: f32) -> Self {
        Self {
            position,
            outer_radius,
            inner_radius,
            weight,
        }
    }
}

/// 椭圆挖掘请求
///
/// `a` 为列方向半径，`b` 为行方向半径，`orientation` 为顺时针弧度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseRequest {
    pub position: [f32; 2],
    pub outer_radius_a: f32,
    pub outer_radius_b: f32,
    pub inner_radius_a: f32,
    pub inner_radius_b: f32,
    pub weight: f32,
    pub orientation: f32,
}

impl EllipseRequest {
    pub fn new(position: [f32; 2], outer_radius_a: f32, outer_radius_b: f32, weight: f32) -> Self {
        Self {
            position,
            outer_radius_a,
            outer_radius_b,
            inner_radius_a: 0.0,
            inner_radius_b: 0.0,
            weight,
            orientation: 0.0,
        }
    }

    pub fn with_inner(mut self, inner_radius_a: f32, inner_radius_b: f32) -> Self {
        self.inner_radius_a = inner_radius_a;
        self.inner_radius_b = inner_radius_b;
        self
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }
}

/// 外部图块请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchRequest {
    pub position: [f32; 2],
    pub orientation: f32,
    pub patch: PatchImage,
}

impl PatchRequest {
    pub fn new(position: [f32; 2], orientation: f32, patch: PatchImage) -> Self {
        Self {
            position,
            orientation,
            patch,
        }
    }
}

/// 任意一种笔刷请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrushRequest {
    Circle(CircleRequest),
    Ellipse(EllipseRequest),
    Patch(PatchRequest),
}

impl BrushRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            BrushRequest::Circle(_) => "circle",
            BrushRequest::Ellipse(_) => "ellipse",
            BrushRequest::Patch(_) => "patch",
        }
    }

    pub fn position(&self) -> [f32; 2] {
        match self {
            BrushRequest::Circle(request) => request.position,
            BrushRequest::Ellipse(request) => request.position,
            BrushRequest::Patch(request) => request.position,
        }
    }
}

impl From<CircleRequest> for BrushRequest {
    fn from(request: CircleRequest) -> Self {
        BrushRequest::Circle(request)
    }
}

impl From<EllipseRequest> for BrushRequest {
    fn from(request: EllipseRequest) -> Self {
        BrushRequest::Ellipse(request)
    }
}

impl From<PatchRequest> for BrushRequest {
    fn from(request: PatchRequest) -> Self {
        BrushRequest::Patch(request)
    }
}
