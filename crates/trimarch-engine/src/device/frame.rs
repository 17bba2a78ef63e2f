/// A single acquired frame.
///
/// Holding the surface texture blocks acquisition of the next frame, so this
/// is finalized through [`Gpu::submit`](super::Gpu::submit) within the same
/// callback.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
