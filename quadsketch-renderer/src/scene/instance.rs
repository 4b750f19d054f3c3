use quadsketch_math::{Color, FlatBuffer, Matrix4, Vector3};

/// Per-quad transform and color.
///
/// # Memory Layout
/// Each instance occupies [`Instance::STRIDE`] consecutive floats in the
/// instance buffer:
/// - floats `0..16`: model matrix, column-major (`mat4` attribute, 4 slots)
/// - floats `16..20`: color as RGBA (`vec4` attribute)
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub position: Vector3,
    pub scale: Vector3,
    pub color: Color,
    model: Matrix4,
}

impl Default for Instance {
    fn default() -> Self {
        Self::new(Vector3::zero(), Color::default())
    }
}

impl Instance {
    /// Number of floats one instance occupies in the packed buffer.
    pub const STRIDE: usize = 16 + 4;
    /// Float offset of the color within an instance slot.
    pub const COLOR_OFFSET: usize = 16;

    pub fn new(position: Vector3, color: Color) -> Self {
        let mut instance = Self {
            position,
            scale: Vector3::new(1.0, 1.0, 1.0),
            color,
            model: Matrix4::identity(),
        };
        instance.update_model();
        instance
    }

    /// Rebuilds the model matrix as `translate(position) * scale(scale)`.
    pub fn update_model(&mut self) -> &Matrix4 {
        self.model.set_from_translation(&self.position).scale(&self.scale)
    }

    pub fn model(&self) -> &Matrix4 {
        &self.model
    }

    /// Packs the model matrix and color into the `index`-th slot of `buffer`.
    ///
    /// # Panics
    /// Panics if `buffer` has fewer than `(index + 1) * STRIDE` floats.
    pub fn write_to(&self, buffer: &mut [f32], index: usize) {
        let offset = index * Self::STRIDE;
        self.model.copy_to_array(buffer, offset);
        self.color.copy_to_array(buffer, offset + Self::COLOR_OFFSET);
    }
}

/// A fixed set of instances and their packed GPU representation.
///
/// The flat buffer is allocated once for the instance count and overwritten
/// in place by [`pack`](Self::pack).
#[derive(Debug, Clone, Default)]
pub struct InstanceBuffer {
    instances: Vec<Instance>,
    data: Vec<f32>,
}

impl InstanceBuffer {
    pub fn new(instances: Vec<Instance>) -> Self {
        let data = vec![0.0; instances.len() * Instance::STRIDE];
        let mut buffer = Self { instances, data };
        buffer.pack();
        buffer
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut [Instance] {
        &mut self.instances
    }

    /// Rebuilds every model matrix and rewrites the flat buffer.
    pub fn pack(&mut self) -> &[f32] {
        for (idx, instance) in self.instances.iter_mut().enumerate() {
            instance.update_model();
            instance.write_to(&mut self.data, idx);
        }
        &self.data
    }

    /// The packed floats as of the last [`pack`](Self::pack).
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn model_translates_then_scales() {
        let mut instance = Instance::new(Vector3::new(2.0, -1.0, 0.0), Color::default());
        instance.scale.set(3.0, 0.5, 1.0);
        let model = *instance.update_model();

        let corner = model.transform_point(&Vector3::new(0.5, 0.5, 0.0));
        assert_eq!(corner, Vector3::new(3.5, -0.75, 0.0));
    }

    #[test]
    fn write_to_fills_only_its_slot() {
        let instance = Instance::new(Vector3::new(1.0, 2.0, 3.0), Color::new(0.1, 0.2, 0.3, 0.4));
        let mut buffer = vec![-1.0; Instance::STRIDE * 3];
        instance.write_to(&mut buffer, 1);

        let slot = &buffer[Instance::STRIDE..Instance::STRIDE * 2];
        assert_eq!(&slot[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(&slot[16..20], &[0.1, 0.2, 0.3, 0.4]);
        assert!(buffer[..Instance::STRIDE].iter().all(|&v| v == -1.0));
        assert!(buffer[Instance::STRIDE * 2..].iter().all(|&v| v == -1.0));
    }

    #[test]
    fn pack_reflects_mutations() {
        let mut buffer = InstanceBuffer::new(vec![Instance::default(); 2]);
        assert_eq!(buffer.data().len(), 2 * Instance::STRIDE);

        buffer.instances_mut()[1].position.set(5.0, 0.0, 0.0);
        buffer.instances_mut()[1].color.set_g(1.0);
        let data = buffer.pack();

        let second = &data[Instance::STRIDE..];
        assert_eq!(second[12], 5.0);
        assert_eq!(second[Instance::COLOR_OFFSET + 1], 1.0);
        assert_eq!(data[12], 0.0);
    }
}
