//! Mesh decode/encode round-trip over hand-written byte streams.

mod common;

use pretty_assertions::assert_eq;
use rosethorn::formats::zms::{MeshFile, VertexFormat};

#[test]
fn skinned_mesh_round_trips_byte_identical() {
    let original = common::skinned_mesh_bytes();

    let zms = MeshFile::from_bytes(&original).unwrap();
    assert_eq!(zms.vertices.len(), 4);
    assert_eq!(zms.indices.len(), 2);
    assert!(zms.format.bones_enabled());

    let encoded = zms.to_bytes();
    assert_eq!(encoded, original);
}

#[test]
fn decoded_fields_survive_a_second_pass() {
    let original = common::skinned_mesh_bytes();
    let first = MeshFile::from_bytes(&original).unwrap();
    let second = MeshFile::from_bytes(&first.to_bytes()).unwrap();

    assert_eq!(first.format, second.format);
    assert_eq!(first.bones, second.bones);
    assert_eq!(first.vertices, second.vertices);
    assert_eq!(first.indices, second.indices);
}

#[test]
fn position_only_stream_round_trips() {
    use glam::Vec3;
    use rosethorn::io::BinaryWriter;

    let mut writer = BinaryWriter::new();
    writer.write_cstring("ZMS0007");
    writer.write_i32(VertexFormat::POSITION.bits());
    writer.write_vec3(Vec3::ZERO);
    writer.write_vec3(Vec3::ONE);
    writer.write_i16(0); // no bone table
    writer.write_i16(3);
    for i in 0..3 {
        writer.write_vec3(Vec3::splat(i as f32));
    }
    writer.write_i16(1);
    for index in [0i16, 1, 2] {
        writer.write_i16(index);
    }
    writer.write_i16(0);
    writer.write_i16(0);
    // ZMS0007: no pool field
    let original = writer.into_bytes();

    let zms = MeshFile::from_bytes(&original).unwrap();
    assert_eq!(zms.version, 7);
    assert_eq!(zms.to_bytes(), original);
}
