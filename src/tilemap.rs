/// A dense 2D grid stored row-major (`y * width + x`).
///
/// Unlike a planet map this grid does not wrap: every coordinate in
/// `[0, width) x [0, height)` owns exactly one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

/// Scalar elevation grid with values nominally in [0, 1].
pub type Heightmap = Tilemap<f32>;

/// RGB grid handed to an image sink.
pub type PixelBuffer = Tilemap<[u8; 3]>;

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Tilemap<T> {
    /// Wrap an already materialized row-major buffer.
    ///
    /// Panics if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "tilemap buffer does not match {}x{}",
            width,
            height
        );
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Bounds-checked lookup; `None` outside the grid.
    pub fn try_get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            Some(&self.data[y * self.width + x])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

impl Tilemap<f32> {
    /// Smallest and largest value in the map, or `None` if it is empty.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let mut min_h = f32::MAX;
        let mut max_h = f32::MIN;
        for &h in &self.data {
            if h < min_h { min_h = h; }
            if h > max_h { max_h = h; }
        }
        Some((min_h, max_h))
    }

    /// Arithmetic mean of all cells (0.0 for an empty map).
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|&h| h as f64).sum();
        (sum / self.data.len() as f64) as f32
    }
}
