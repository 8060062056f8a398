//! 地形修改器
//!
//! 圆形、椭圆和图块请求的入口。每个请求同步执行完毕：
//! 参数校验 → 高度场校验 →（图块）导入 → 生成笔刷核 →（椭圆、图块）扩展并旋转 → 合成。
//! 任何一步失败都会记录错误日志并提前返回，此前不会写入任何单元格。

use super::compositor::{apply_kernel, Footprint, GridPoint};
use super::heightmap::HeightField;
use crate::brush::{self, EllipseRadii, Kernel, KernelView, MergeOperation};
use crate::config::ModifierConfig;
use crate::error::{ModifyError, ModifyResult};
use crate::request::{BrushRequest, CircleRequest, EllipseRequest, PatchRequest};
use log::{error, info};

/// 地形修改器，自身不保存任何高度场状态
#[derive(Debug, Clone, Default)]
pub struct TerrainModifier {
    config: ModifierConfig,
}

/// 高度场必须存在且关联了地形对象
fn ready_field<F: HeightField + ?Sized>(field: Option<&mut F>) -> ModifyResult<&mut F> {
    let field =
        field.ok_or_else(|| ModifyError::MissingResource("heightmap is null".into()))?;
    if !field.is_ready() {
        return Err(ModifyError::MissingResource(
            "heightmap has no associated terrain object".into(),
        ));
    }
    Ok(field)
}

/// 笔刷半径上限：高度图边长的倍数
const MAX_RADIUS_FACTOR: f32 = 2.0;

/// 缩放后的外半径不能超过高度图边长的 [`MAX_RADIUS_FACTOR`] 倍
fn check_extent(radius: f32, size: i64) -> ModifyResult<()> {
    let limit = MAX_RADIUS_FACTOR * size as f32;
    if radius > limit {
        return Err(ModifyError::InvalidParameter(format!(
            "outer_radius of {} cells exceeds the limit of {} cells",
            radius, limit
        )));
    }
    Ok(())
}

/// 请求位置映射到网格中心
fn resolve_center<F: HeightField + ?Sized>(field: &F, position: [f32; 2]) -> GridPoint {
    GridPoint::from_normalized(field.world_to_grid(position), field.size())
}

fn report(
    kind: &str,
    position: [f32; 2],
    result: ModifyResult<Footprint>,
) -> ModifyResult<Footprint> {
    match &result {
        Ok(footprint) => info!(
            "{} operation performed at ({}, {}), {} cells touched",
            kind,
            position[0],
            position[1],
            footprint.area()
        ),
        Err(err) => error!(
            "{} operation at ({}, {}) rejected: {}",
            kind, position[0], position[1], err
        ),
    }
    result
}

impl TerrainModifier {
    pub fn new(config: ModifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModifierConfig {
        &self.config
    }

    /// 按请求类型分派，使用配置中的合并规则
    pub fn modify<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &BrushRequest,
    ) -> ModifyResult<Footprint> {
        match request {
            BrushRequest::Circle(request) => self.modify_circle(field, request),
            BrushRequest::Ellipse(request) => self.modify_ellipse(field, request),
            BrushRequest::Patch(request) => self.modify_patch(field, request),
        }
    }

    pub fn modify_circle<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &CircleRequest,
    ) -> ModifyResult<Footprint> {
        self.modify_circle_with(field, request, self.config.merge)
    }

    pub fn modify_circle_with<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &CircleRequest,
        merge: MergeOperation,
    ) -> ModifyResult<Footprint> {
        let result = self.circle(field, request, merge);
        report("circle", request.position, result)
    }

    pub fn modify_ellipse<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &EllipseRequest,
    ) -> ModifyResult<Footprint> {
        self.modify_ellipse_with(field, request, self.config.merge)
    }

    pub fn modify_ellipse_with<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &EllipseRequest,
        merge: MergeOperation,
    ) -> ModifyResult<Footprint> {
        let result = self.ellipse(field, request, merge);
        report("ellipse", request.position, result)
    }

    pub fn modify_patch<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &PatchRequest,
    ) -> ModifyResult<Footprint> {
        self.modify_patch_with(field, request, self.config.merge)
    }

    pub fn modify_patch_with<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &PatchRequest,
        merge: MergeOperation,
    ) -> ModifyResult<Footprint> {
        let result = self.patch(field, request, merge);
        report("patch", request.position, result)
    }

    fn circle<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &CircleRequest,
        merge: MergeOperation,
    ) -> ModifyResult<Footprint> {
        brush::synthesis::validate_circle(request.outer_radius, request.inner_radius)?;
        let field = ready_field(field)?;

        let size = field.size();
        let scale = size as f32;
        check_extent(scale * request.outer_radius, size)?;
        let kernel = brush::circle(
            scale * request.outer_radius,
            scale * request.inner_radius,
            request.weight,
            self.config.falloff,
        )?;
        let center = resolve_center(&*field, request.position);

        apply_kernel(field, center, kernel.view(), merge)
    }

    fn ellipse<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &EllipseRequest,
        merge: MergeOperation,
    ) -> ModifyResult<Footprint> {
        let radii = EllipseRadii::new(
            request.outer_radius_a,
            request.outer_radius_b,
            request.inner_radius_a,
            request.inner_radius_b,
        );
        radii.validate()?;
        let field = ready_field(field)?;

        let size = field.size();
        let radii = radii.scaled(size as f32);
        check_extent(radii.outer_a.max(radii.outer_b), size)?;
        let center = resolve_center(&*field, request.position);
        let kernel = brush::ellipse(&radii, request.weight, self.config.falloff)?;
        let kernel = self.orient(kernel.view(), request.orientation);

        apply_kernel(field, center, kernel.view(), merge)
    }

    fn patch<F: HeightField + ?Sized>(
        &self,
        field: Option<&mut F>,
        request: &PatchRequest,
        merge: MergeOperation,
    ) -> ModifyResult<Footprint> {
        let field = ready_field(field)?;
        let imported = brush::import_patch(&request.patch)?;

        let center = resolve_center(&*field, request.position);
        let kernel = self.orient(imported.view(), request.orientation);

        apply_kernel(field, center, kernel.view(), merge)
    }

    /// 扩展画布后旋转，旋转结果不会丢失非零单元格
    fn orient(&self, kernel: KernelView<'_>, orientation: f32) -> Kernel {
        let canvas = brush::expand(kernel);
        brush::rotate(&canvas, orientation, self.config.interpolation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::PatchImage;
    use crate::terrain::heightmap::HeightMap;

    /// 统计写入次数的高度场
    struct CountingField {
        inner: HeightMap,
        ready: bool,
        sets: usize,
    }

    impl CountingField {
        fn new(size: usize) -> Self {
            Self {
                inner: HeightMap::filled(size, 1.0),
                ready: true,
                sets: 0,
            }
        }
    }

    impl HeightField for CountingField {
        fn size(&self) -> i64 {
            self.inner.size() as i64
        }
        fn get(&self, x: i64, y: i64) -> f32 {
            self.inner.get(x, y)
        }
        fn set(&mut self, x: i64, y: i64, value: f32) {
            self.sets += 1;
            self.inner.set(x, y, value);
        }
        fn world_to_grid(&self, position: [f32; 2]) -> [f32; 2] {
            self.inner.world_to_grid(position)
        }
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_invalid_circle_radii_write_nothing() {
        let modifier = TerrainModifier::default();
        let mut field = CountingField::new(64);
        for (outer, inner) in [(0.0, 0.0), (-0.1, 0.0), (0.1, 0.2), (f32::NAN, 0.0)] {
            let request = CircleRequest::new([32.0, 32.0], outer, inner, 1.0);
            let err = modifier.modify_circle(Some(&mut field), &request).unwrap_err();
            assert!(matches!(err, ModifyError::InvalidParameter(_)));
        }
        assert_eq!(field.sets, 0);
    }

    #[test]
    fn test_invalid_ellipse_radii_write_nothing() {
        let modifier = TerrainModifier::default();
        let mut field = CountingField::new(64);
        let requests = [
            EllipseRequest::new([32.0, 32.0], 0.0, 0.1, 1.0),
            EllipseRequest::new([32.0, 32.0], 0.1, -0.1, 1.0),
            EllipseRequest::new([32.0, 32.0], 0.1, 0.1, 1.0).with_inner(0.2, 0.0),
            EllipseRequest::new([32.0, 32.0], 0.1, 0.1, 1.0).with_inner(0.0, 0.11),
        ];
        for request in &requests {
            let err = modifier.modify_ellipse(Some(&mut field), request).unwrap_err();
            assert!(matches!(err, ModifyError::InvalidParameter(_)));
        }
        assert_eq!(field.sets, 0);
    }

    #[test]
    fn test_oversized_brush_is_rejected() {
        let modifier = TerrainModifier::default();
        let mut field = CountingField::new(64);

        let request = CircleRequest::new([32.0, 32.0], 1e6, 0.0, 1.0);
        let err = modifier.modify_circle(Some(&mut field), &request).unwrap_err();
        assert!(matches!(err, ModifyError::InvalidParameter(_)));

        let request = EllipseRequest::new([32.0, 32.0], 0.1, 1e6, 1.0);
        let err = modifier.modify_ellipse(Some(&mut field), &request).unwrap_err();
        assert!(matches!(err, ModifyError::InvalidParameter(_)));
        assert_eq!(field.sets, 0);

        // 恰好覆盖整个高度图的笔刷仍然允许
        let request = CircleRequest::new([32.0, 32.0], 1.0, 0.0, 1.0);
        assert!(modifier.modify_circle(Some(&mut field), &request).is_ok());
    }

    #[test]
    fn test_far_away_position_is_a_noop() {
        let modifier = TerrainModifier::default();
        let mut field = CountingField::new(64);
        for position in [[1e30, 1e30], [-1e30, 0.0], [f32::INFINITY, 0.0]] {
            let request = CircleRequest::new(position, 0.1, 0.0, 1.0);
            let footprint = modifier.modify_circle(Some(&mut field), &request).unwrap();
            assert!(footprint.is_empty(), "{:?} -> {:?}", position, footprint);

            let request = EllipseRequest::new(position, 0.1, 0.05, 1.0).with_orientation(0.5);
            let footprint = modifier.modify_ellipse(Some(&mut field), &request).unwrap();
            assert!(footprint.is_empty());
        }
        assert_eq!(field.sets, 0);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let modifier = TerrainModifier::default();
        let request = CircleRequest::new([0.0, 0.0], 0.1, 0.0, 1.0);
        let err = modifier
            .modify_circle(None::<&mut HeightMap>, &request)
            .unwrap_err();
        assert!(matches!(err, ModifyError::MissingResource(_)));

        let mut field = CountingField::new(32);
        field.ready = false;
        let err = modifier.modify_circle(Some(&mut field), &request).unwrap_err();
        assert!(matches!(err, ModifyError::MissingResource(_)));
        assert_eq!(field.sets, 0);
    }

    #[test]
    fn test_parameter_check_precedes_field_check() {
        let modifier = TerrainModifier::default();
        let request = CircleRequest::new([0.0, 0.0], -1.0, 0.0, 1.0);
        let err = modifier
            .modify_circle(None::<&mut HeightMap>, &request)
            .unwrap_err();
        assert!(matches!(err, ModifyError::InvalidParameter(_)));
    }

    #[test]
    fn test_patch_encoding_rejected_without_writes() {
        let modifier = TerrainModifier::default();
        let mut field = CountingField::new(32);
        let mut patch = PatchImage::from_f32(2, 2, &[0.5; 4]);
        patch.encoding = "8UC3".into();

        let request = PatchRequest::new([16.0, 16.0], 0.0, patch);
        let err = modifier.modify_patch(Some(&mut field), &request).unwrap_err();
        assert!(matches!(err, ModifyError::UnsupportedFormat(_)));
        assert_eq!(field.sets, 0);
    }

    #[test]
    fn test_patch_applies_at_center() {
        let modifier = TerrainModifier::new(ModifierConfig::with_merge(MergeOperation::Min));
        let mut field = CountingField::new(32);
        let patch = PatchImage::from_f32(3, 3, &[0.25; 9]);

        let request = PatchRequest::new([16.0, 16.0], 0.0, patch);
        let footprint = modifier.modify_patch(Some(&mut field), &request).unwrap();

        assert_eq!(field.sets as i64, footprint.area());
        assert_eq!(field.inner.get(16, 16), 0.25);
        assert_eq!(field.inner.get(15, 17), 0.25);
        // 扩展画布的补边为 0，Min 合并会把它写成 0
        assert_eq!(field.inner.get(14, 16), 0.0);
        assert_eq!(field.inner.get(16, 19), 1.0);
    }

    #[test]
    fn test_dispatch_by_request_kind() {
        let modifier = TerrainModifier::default();
        let mut field = CountingField::new(64);
        let request: BrushRequest = CircleRequest::new([32.0, 32.0], 0.05, 0.0, 0.5).into();
        assert_eq!(request.kind(), "circle");

        let footprint = modifier.modify(Some(&mut field), &request).unwrap();
        assert_eq!(field.sets as i64, footprint.area());
        assert!(field.inner.get(32, 32) < 1.0);
    }
}
