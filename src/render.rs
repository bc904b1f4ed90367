use folio_core::geometry::{PageMesh, SurfaceRange};
use folio_core::material::SurfaceKind;
use folio_core::skin::SkinnedBook;
use folio_core::{Book, Camera, Side, Ticker, BOOK_WGSL};
use smallvec::SmallVec;
use wgpu::util::DeviceExt;
use web_sys as web;

use crate::constants::{AMBIENT, CLEAR_RGB, LIGHT_DIR, WHITE_TEXEL};
use crate::content::PagePicture;

mod helpers;
mod targets;
use helpers::{MaterialUniforms, SceneUniforms};
use targets::{DepthTarget, DEPTH_FORMAT};

// ===================== WebGPU state =====================

struct FaceGpu {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    // Kept alive for the bind group; replaced when the picture arrives
    texture: Option<wgpu::Texture>,
}

struct PageGpu {
    vertex_buffer: wgpu::Buffer,
    faces: Vec<FaceGpu>,
}

impl PageGpu {
    /// Both picture faces resolved (image or placeholder).
    fn ready(&self) -> bool {
        [SurfaceKind::Front, SurfaceKind::Back]
            .iter()
            .all(|k| self.faces[*k as usize].texture.is_some())
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    opaque_pipeline: wgpu::RenderPipeline,
    blended_pipeline: wgpu::RenderPipeline,
    depth: DepthTarget,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    material_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_view: wgpu::TextureView,

    index_buffer: wgpu::Buffer,
    groups: SmallVec<[SurfaceRange; 6]>,
    pages: Vec<PageGpu>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    camera: Camera,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        mesh: &PageMesh,
        page_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("book_shader"),
            source: wgpu::ShaderSource::Wgsl(BOOK_WGSL.into()),
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("book_pipeline_layout"),
            bind_group_layouts: &[&scene_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let make_pipeline = |blend| {
            helpers::make_book_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                DEPTH_FORMAT,
                blend,
            )
        };
        let opaque_pipeline = make_pipeline(None);
        let blended_pipeline = make_pipeline(Some(wgpu::BlendState::ALPHA_BLENDING));

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("picture_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (white_tex, white_view) = helpers::create_color_texture(
            &device,
            "white_tex",
            1,
            1,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        helpers::write_rgba(&queue, &white_tex, 1, 1, &WHITE_TEXEL);

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("page_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut state = Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            blended_pipeline,
            depth,
            scene_buffer,
            scene_bind_group,
            material_layout,
            sampler,
            white_view,
            index_buffer,
            groups: mesh.groups.clone(),
            pages: Vec::with_capacity(page_count),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
            camera: Camera::book_view(crate::input::aspect(width, height)),
        };
        for i in 0..page_count {
            let page = state.create_page(i, mesh);
            state.pages.push(page);
        }
        Ok(state)
    }

    fn create_page(&self, index: usize, mesh: &PageMesh) -> PageGpu {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("page{}_vertices", index)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let faces = SurfaceKind::ALL
            .iter()
            .map(|kind| {
                let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("page{}_{:?}_material", index, kind)),
                    size: std::mem::size_of::<MaterialUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = self.material_bind_group(&uniform_buffer, &self.white_view);
                FaceGpu {
                    uniform_buffer,
                    bind_group,
                    texture: None,
                }
            })
            .collect();
        PageGpu {
            vertex_buffer,
            faces,
        }
    }

    fn material_bind_group(
        &self,
        uniform_buffer: &wgpu::Buffer,
        view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bg"),
            layout: &self.material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Attach a loaded picture to one face of a page.
    pub fn set_picture(&mut self, page: usize, side: Side, picture: &PagePicture) {
        let kind = SurfaceKind::for_side(side);
        let Some(slot) = self.pages.get(page) else {
            log::warn!("[render] picture for unknown page {}", page);
            return;
        };
        let label = format!("page{}_{}", page, side.label());
        let (tex, view) = helpers::upload_picture(&self.device, &self.queue, &label, picture);
        let bind_group = self.material_bind_group(&slot.faces[kind as usize].uniform_buffer, &view);
        let face = &mut self.pages[page].faces[kind as usize];
        if let Some(old) = face.texture.replace(tex) {
            old.destroy();
        }
        face.bind_group = bind_group;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Release every page's buffers and textures. Nothing is drawn afterwards.
    pub fn clear_pages(&mut self) {
        for page in self.pages.drain(..) {
            page.vertex_buffer.destroy();
            for face in page.faces {
                face.uniform_buffer.destroy();
                if let Some(tex) = face.texture {
                    tex.destroy();
                }
            }
        }
        log::info!("[render] page resources released");
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
            self.camera.aspect = crate::input::aspect(width, height);
        }
    }

    pub fn render<T: Ticker>(
        &mut self,
        book: &Book<T>,
        skinned: &SkinnedBook,
    ) -> Result<(), wgpu::SurfaceError> {
        let scene = SceneUniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            eye: self.camera.eye.extend(1.0).to_array(),
            light_dir: [LIGHT_DIR[0], LIGHT_DIR[1], LIGHT_DIR[2], AMBIENT],
        };
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));

        for (page, gpu) in book.pages().iter().zip(&self.pages) {
            let vertices = skinned.page_vertices(page.index());
            if !vertices.is_empty() {
                self.queue
                    .write_buffer(&gpu.vertex_buffer, 0, bytemuck::cast_slice(vertices));
            }
            for kind in SurfaceKind::ALL {
                let m = MaterialUniforms::new(book.material(kind), page.highlight_intensity());
                self.queue.write_buffer(
                    &gpu.faces[kind as usize].uniform_buffer,
                    0,
                    bytemuck::bytes_of(&m),
                );
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("book_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            // Opaque surfaces of every page first, then the blended ones
            for (pipeline, transparent) in [(&self.opaque_pipeline, false), (&self.blended_pipeline, true)] {
                rpass.set_pipeline(pipeline);
                for gpu in self.pages.iter().filter(|p| p.ready()) {
                    rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    for group in self
                        .groups
                        .iter()
                        .filter(|g| book.material(g.kind).transparent == transparent)
                    {
                        rpass.set_bind_group(1, &gpu.faces[group.kind as usize].bind_group, &[]);
                        rpass.draw_indexed(group.start..group.start + group.count, 0, 0..1);
                    }
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
