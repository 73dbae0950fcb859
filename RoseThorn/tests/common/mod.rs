//! Shared fixture builders: synthesized asset byte streams, no binary
//! blobs checked in.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use glam::{Quat, Vec3};
use rosethorn::io::BinaryWriter;

/// A heightmap whose sample at grid (x, y) is `y * width + x`.
pub fn heightmap_bytes(width: i32, height: i32, scale: f32) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_i32(width);
    writer.write_i32(height);
    writer.write_i32((width - 1) * (height - 1));
    writer.write_f32(scale);
    for i in 0..(width * height) {
        writer.write_f32(i as f32);
    }
    writer.into_bytes()
}

pub fn tile_grid_bytes(width: i32, height: i32) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_i32(width);
    writer.write_i32(height);
    for i in 0..(width * height) {
        writer.write_u8(0);
        writer.write_u8(i as u8);
        writer.write_u8(0);
        writer.write_i32(i);
    }
    writer.into_bytes()
}

/// Map data with a single decoration block holding `objects` placements.
pub fn map_data_bytes(objects: u32) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_u32(1);
    writer.write_u32(1); // decoration block
    writer.write_u32(12); // right after this table
    writer.write_u32(objects);
    for i in 0..objects {
        writer.write_string_u8(&format!("OBJ{i:03}"));
        writer.write_u16(0);
        writer.write_u16(0);
        writer.write_u32(1);
        writer.write_u32(i);
        writer.write_i32(0);
        writer.write_i32(0);
        writer.write_quat_wxyz(Quat::IDENTITY);
        writer.write_vec3(Vec3::new(i as f32, 0.0, 5.0));
        writer.write_vec3(Vec3::ONE);
    }
    writer.into_bytes()
}

/// A three-bone skeleton: root, pelvis under root, spine under pelvis.
pub fn skeleton_bytes() -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_bytes(b"ZMD0003");
    writer.write_u32(3);

    writer.write_u32(0);
    writer.write_cstring("b1_root");
    writer.write_vec3(Vec3::ZERO);
    writer.write_quat_wxyz(Quat::IDENTITY);

    writer.write_u32(0);
    writer.write_cstring("b2_pelvis");
    writer.write_vec3(Vec3::new(0.0, 0.0, 8.0));
    writer.write_quat_wxyz(Quat::IDENTITY);

    writer.write_u32(1);
    writer.write_cstring("b3_spine");
    writer.write_vec3(Vec3::new(0.0, 0.8, 3.5));
    writer.write_quat_wxyz(Quat::IDENTITY);

    writer.write_u32(0); // no dummy points
    writer.into_bytes()
}

/// A hand-written skinned `ZMS0008` stream: position + normal + bones +
/// uv1, two triangles.
pub fn skinned_mesh_bytes() -> Vec<u8> {
    let format = (1 << 1) | (1 << 2) | (1 << 4) | (1 << 5) | (1 << 7);

    let mut writer = BinaryWriter::new();
    writer.write_cstring("ZMS0008");
    writer.write_i32(format);
    writer.write_vec3(Vec3::ZERO); // bounding min
    writer.write_vec3(Vec3::new(4.0, 4.0, 4.0));

    writer.write_i16(2); // bone table
    writer.write_i16(0);
    writer.write_i16(3);

    writer.write_i16(4); // vertices
    for i in 0..4 {
        writer.write_vec3(Vec3::new(i as f32, (i * 2) as f32, 1.0));
    }
    for _ in 0..4 {
        writer.write_vec3(Vec3::new(0.0, 0.0, 1.0)); // source up
    }
    for i in 0..4i16 {
        for weight in [1.0, 0.0, 0.0, 0.0] {
            writer.write_f32(weight);
        }
        for index in [i % 2, 0, 0, 0] {
            writer.write_i16(index);
        }
    }
    for i in 0..4 {
        writer.write_f32(i as f32 * 0.25);
        writer.write_f32(1.0 - i as f32 * 0.25);
    }

    writer.write_i16(2); // triangles
    for triple in [[0i16, 1, 2], [2, 1, 3]] {
        for index in triple {
            writer.write_i16(index);
        }
    }

    writer.write_i16(0); // materials
    writer.write_i16(0); // strips
    writer.write_i16(0); // pool
    writer.into_bytes()
}
