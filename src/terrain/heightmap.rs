//! 高度场访问接口
//!
//! 核心只通过 [`HeightField`] 读写高度，不依赖宿主的具体地形类型。
//! [`HeightMap`] 是一个内存中的实现，供演示程序、测试和基准使用。

/// 高度场访问器
///
/// 坐标为整数网格坐标，网格为 `size × size` 的正方形。
/// `get`/`set` 不保证原子性或可重入，同一高度场同一时间只能有一个调用方。
pub trait HeightField {
    /// 网格边长（单元格数）
    fn size(&self) -> i64;

    fn get(&self, x: i64, y: i64) -> f32;

    fn set(&mut self, x: i64, y: i64, value: f32);

    /// 世界坐标转换为网格上的归一化坐标 `[0,1]²`
    fn world_to_grid(&self, position: [f32; 2]) -> [f32; 2];

    /// 高度场是否关联了可用的地形对象
    fn is_ready(&self) -> bool {
        true
    }
}

/// 内存高度图
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    size: usize,
    origin: [f32; 2],
    world_size: f32,
    data: Vec<f32>,
}

impl HeightMap {
    /// 创建全零高度图，世界范围与网格一一对应
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    pub fn filled(size: usize, value: f32) -> Self {
        Self {
            size,
            origin: [0.0, 0.0],
            world_size: size as f32,
            data: vec![value; size * size],
        }
    }

    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> f32) -> Self {
        let mut map = Self::new(size);
        for y in 0..size {
            for x in 0..size {
                map.data[y * size + x] = f(x, y);
            }
        }
        map
    }

    /// 设置世界坐标范围：`origin` 对应网格 (0,0)，`world_size` 为边长
    pub fn with_world_extent(mut self, origin: [f32; 2], world_size: f32) -> Self {
        self.origin = origin;
        self.world_size = world_size;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sample(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.size && y < self.size {
            Some(self.data[y * self.size + x])
        } else {
            None
        }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// 网格单元格对应的世界坐标
    pub fn grid_to_world(&self, x: f32, y: f32) -> [f32; 2] {
        let scale = self.world_size / self.size.max(1) as f32;
        [self.origin[0] + x * scale, self.origin[1] + y * scale]
    }

    /// `(min, max)`，空高度图返回 `(0, 0)`
    pub fn min_max(&self) -> (f32, f32) {
        if self.data.is_empty() {
            return (0.0, 0.0);
        }
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &h| {
                (min.min(h), max.max(h))
            })
    }

    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }
}

impl HeightField for HeightMap {
    fn size(&self) -> i64 {
        self.size as i64
    }

    /// 越界坐标钳制到最近的边缘单元格
    fn get(&self, x: i64, y: i64) -> f32 {
        if self.size == 0 {
            return 0.0;
        }
        let max = self.size as i64 - 1;
        let x = x.clamp(0, max) as usize;
        let y = y.clamp(0, max) as usize;
        self.data[y * self.size + x]
    }

    /// 越界写入被忽略
    fn set(&mut self, x: i64, y: i64, value: f32) {
        let size = self.size as i64;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            self.data[y as usize * self.size + x as usize] = value;
        }
    }

    fn world_to_grid(&self, position: [f32; 2]) -> [f32; 2] {
        [
            (position[0] - self.origin[0]) / self.world_size,
            (position[1] - self.origin[1]) / self.world_size,
        ]
    }

    /// 空高度图没有地形对象
    fn is_ready(&self) -> bool {
        self.size > 0
    }
}
