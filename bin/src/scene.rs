//! Demo scene

use crate::camera::*;
use accelerators::*;
use lights::*;
use materials::*;
use rt_core::geometry::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::reflection::*;
use rt_core::shape::*;
use rt_core::spectrum::*;
use rt_core::texture::*;
use shapes::*;
use std::sync::Arc;

/// Binds a shape in the aggregate to its material and, for emitters, its light.
#[derive(Copy, Clone, Debug)]
pub struct SceneObject {
    /// Index into `Scene::materials`.
    pub material: usize,

    /// Index into `Scene::lights`.
    pub light: Option<usize>,
}

/// Everything the renderer needs.
pub struct Scene {
    /// Shapes indexed by object id.
    pub aggregate: ShapeAggregate,

    /// Per object data, parallel to the aggregate's shapes.
    pub objects: Vec<SceneObject>,

    /// Materials.
    pub materials: Vec<Material>,

    /// All lights, including those attached to objects.
    pub lights: Vec<Box<dyn Light>>,

    /// Camera.
    pub camera: Camera,
}

/// Collects objects while a scene is assembled.
#[derive(Default)]
struct SceneBuilder {
    shapes: Vec<ArcShape>,
    objects: Vec<SceneObject>,
    materials: Vec<Material>,
    lights: Vec<Box<dyn Light>>,
}

impl SceneBuilder {
    fn add_material(&mut self, material: Material) -> usize {
        material.compile();
        self.materials.push(material);
        self.materials.len() - 1
    }

    fn add_light(&mut self, light: Box<dyn Light>) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    fn add_object(&mut self, shape: ArcShape, material: usize, light: Option<usize>) {
        self.shapes.push(shape);
        self.objects.push(SceneObject { material, light });
    }
}

/// Returns a material with the named BSDF.
///
/// * `name`      - Debug name.
/// * `bsdf`      - Registered BSDF name.
/// * `color`     - Base colour.
/// * `roughness` - Roughness.
fn material(name: &str, bsdf: &str, color: RayColor, roughness: Float) -> Material {
    let mut material = Material::new(name);
    material.set_bsdf_by_name(bsdf);
    material.base_color = ColorParameter::new(color);
    material.roughness = ScalarParameter::new(roughness);
    material
}

impl Scene {
    /// Build a box open towards the camera holding one object per BSDF type,
    /// lit by every kind of light.
    ///
    /// * `aspect`            - Image width over height.
    /// * `max_prims_in_node` - Maximum number of shapes in a BVH leaf.
    /// * `split_method`      - BVH split method.
    pub fn demo(aspect: Float, max_prims_in_node: usize, split_method: SplitMethod) -> Self {
        let mut builder = SceneBuilder::default();

        let white = builder.add_material(material("white", "diffuse", RayColor::splat(0.75), 0.0));
        let red = builder.add_material(material("red", "roughDiffuse", RayColor::new(0.75, 0.1, 0.1), 0.5));
        let green = builder.add_material(material("green", "diffuse", RayColor::new(0.1, 0.6, 0.1), 0.0));

        let mut floor = material("floor", "diffuse", RayColor::one(), 0.0);
        floor.base_color = ColorParameter::with_texture(
            RayColor::one(),
            Arc::new(CheckerboardTexture::new([0.8, 0.8, 0.8, 1.0], [0.3, 0.3, 0.3, 1.0], 8.0)),
        );
        let floor = builder.add_material(floor);

        let emitter = builder.add_material(material("emitter", "diffuse", RayColor::zero(), 0.0));

        let mut glass = material("glass", "dielectric", RayColor::one(), 0.0);
        glass.dispersion.enable = true;
        let glass = builder.add_material(glass);

        let frosted = builder.add_material(material("frosted", "roughDielectric", RayColor::one(), 0.2));
        let mirror = builder.add_material(material("mirror", "metal", RayColor::splat(0.95), 0.0));

        let mut gold = material("gold", "roughMetal", RayColor::new(1.0, 0.78, 0.34), 0.3);
        gold.ior = 0.27;
        gold.k = 2.8;
        gold.metalness = ScalarParameter::new(1.0);
        let gold = builder.add_material(gold);

        let plastic = builder.add_material(material("plastic", "plastic", RayColor::new(0.1, 0.2, 0.7), 0.0));
        let satin = builder.add_material(material("satin", "roughPlastic", RayColor::new(0.8, 0.5, 0.2), 0.35));

        // Walls; normals face the inside of the box.
        let walls = [
            (Point3f::new(0.0, -1.0, 0.0), Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(2.0, 0.0, 0.0), floor),
            (Point3f::new(0.0, 1.0, 0.0), Vector3f::new(2.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 2.0), white),
            (Point3f::new(0.0, 0.0, -1.0), Vector3f::new(2.0, 0.0, 0.0), Vector3f::new(0.0, 2.0, 0.0), white),
            (Point3f::new(-1.0, 0.0, 0.0), Vector3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, 0.0, 2.0), red),
            (Point3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 2.0, 0.0), green),
        ];
        for (center, edge_u, edge_v, material) in walls {
            builder.add_object(Arc::new(Rect::new(center, edge_u, edge_v)), material, None);
        }

        // Ceiling lamp facing down.
        let lamp: ArcShape = Arc::new(Rect::new(
            Point3f::new(0.0, 0.999, 0.0),
            Vector3f::new(0.5, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 0.5),
        ));
        let lamp_light = builder.add_light(Box::new(AreaLight::new(Arc::clone(&lamp), RayColor::splat(12.0))));
        builder.add_object(lamp, emitter, Some(lamp_light));

        builder.add_object(Arc::new(Sphere::new(Point3f::new(-0.3, -0.7, 0.35), 0.3)), glass, None);
        builder.add_object(Arc::new(Sphere::new(Point3f::new(0.5, -0.85, 0.5), 0.15)), frosted, None);
        builder.add_object(Arc::new(Sphere::new(Point3f::new(0.05, -0.88, 0.7), 0.12)), mirror, None);
        builder.add_object(Arc::new(Sphere::new(Point3f::new(0.45, -0.7, -0.25), 0.3)), gold, None);
        builder.add_object(Arc::new(Sphere::new(Point3f::new(0.0, -0.8, -0.6), 0.2)), plastic, None);
        builder.add_object(
            Arc::new(BoxShape::new(Point3f::new(-0.8, -1.0, -0.8), Point3f::new(-0.35, -0.4, -0.35))),
            satin,
            None,
        );

        // Lights not attached to any shape.
        builder.add_light(Box::new(PointLight::new(Point3f::new(0.6, 0.6, 0.6), RayColor::splat(0.3))));
        builder.add_light(Box::new(SpotLight::new(
            Point3f::new(-0.6, 0.8, 0.6),
            Vector3f::new(0.3, -1.0, -0.4),
            RayColor::splat(1.5),
            40.0,
            30.0,
        )));
        builder.add_light(Box::new(DirectionalLight::new(Vector3f::new(0.1, -0.3, -1.0), RayColor::splat(0.2))));
        builder.add_light(Box::new(BackgroundLight::new(RayColor::new(0.05, 0.07, 0.1))));

        let SceneBuilder {
            shapes,
            objects,
            materials,
            mut lights,
        } = builder;

        let aggregate = ShapeAggregate::new(shapes, max_prims_in_node, split_method);
        let bounds = aggregate.bounding_box();
        for light in lights.iter_mut() {
            light.preprocess(&bounds);
        }

        info!(
            "Demo scene: {} objects, {} materials, {} lights",
            objects.len(),
            materials.len(),
            lights.len()
        );

        let camera = Camera::new(
            Point3f::new(0.0, 0.0, 3.6),
            Point3f::new(0.0, -0.1, 0.0),
            Vector3f::Y_AXIS,
            40.0,
            aspect,
        );

        Self {
            aggregate,
            objects,
            materials,
            lights,
            camera,
        }
    }

    /// Returns the material of an object.
    ///
    /// * `object_id` - Object id from a hit point.
    pub fn material(&self, object_id: u32) -> &Material {
        &self.materials[self.objects[object_id as usize].material]
    }

    /// Returns the light attached to an object, if any.
    ///
    /// * `object_id` - Object id from a hit point.
    pub fn object_light(&self, object_id: u32) -> Option<&dyn Light> {
        self.objects[object_id as usize].light.map(|i| self.lights[i].as_ref())
    }

    /// Returns lights that are hit by rays leaving the scene.
    pub fn background_lights(&self) -> impl Iterator<Item = &dyn Light> {
        self.lights.iter().filter(|l| !l.is_finite() && !l.is_delta()).map(|l| l.as_ref())
    }
}
