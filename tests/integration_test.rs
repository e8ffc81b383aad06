use approx::assert_abs_diff_eq;
use engine_math::math::{Matrix4, Quaternion, Transform, Vector2, Vector3, Vector4};
use engine_math::scene::{Camera, ProjectionSettings, Ray};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn random_matrix(rng: &mut ChaCha8Rng) -> Matrix4 {
    let mut values = [0.0; 16];
    for value in &mut values {
        *value = rng.gen_range(-1.0..1.0);
    }
    Matrix4::from_array(values)
}

// Diagonally dominant, so always comfortably invertible
fn random_invertible_matrix(rng: &mut ChaCha8Rng) -> Matrix4 {
    let mut matrix = random_matrix(rng);
    for i in 0..4 {
        matrix[i][i] += 4.0;
    }
    matrix
}

fn random_euler(rng: &mut ChaCha8Rng) -> Vector3 {
    Vector3::new(
        rng.gen_range(-170.0..170.0),
        rng.gen_range(-80.0..80.0),
        rng.gen_range(-170.0..170.0),
    )
}

#[test]
fn test_identity_is_neutral() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..100 {
        let m = random_matrix(&mut rng);
        assert_eq!(Matrix4::IDENTITY.multiply(&m), m);
        assert_eq!(m.multiply(&Matrix4::IDENTITY), m);
    }
}

#[test]
fn test_inverse_round_trip() -> TestResult {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..100 {
        let m = random_invertible_matrix(&mut rng);
        let inverse = m.invert()?;
        assert_abs_diff_eq!(m.multiply(&inverse), Matrix4::IDENTITY, epsilon = 1e-4);
        assert_abs_diff_eq!(inverse.multiply(&m), Matrix4::IDENTITY, epsilon = 1e-4);
    }
    Ok(())
}

#[test]
fn test_multiplication_is_associative() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..100 {
        let a = random_matrix(&mut rng);
        let b = random_matrix(&mut rng);
        let c = random_matrix(&mut rng);
        assert_abs_diff_eq!(
            a.multiply(&b).multiply(&c),
            a.multiply(&b.multiply(&c)),
            epsilon = 1e-4
        );
    }
}

#[test]
fn test_double_transpose_is_exact() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..100 {
        let m = random_matrix(&mut rng);
        assert_eq!(m.transpose().transpose(), m);
    }
}

#[test]
fn test_transform_distributes_over_multiply() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..50 {
        let a = random_matrix(&mut rng);
        let b = random_matrix(&mut rng);
        let v = Vector4::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            1.0,
        );
        assert_abs_diff_eq!(
            a.multiply(&b).transform(&v),
            a.transform(&b.transform(&v)),
            epsilon = 1e-4
        );
    }
}

#[test]
fn test_euler_and_quaternion_rotations_agree() {
    let mut rng = ChaCha8Rng::seed_from_u64(19);
    for _ in 0..100 {
        let euler = random_euler(&mut rng);
        let quaternion = Quaternion::from_euler(&euler);

        assert_abs_diff_eq!(
            Matrix4::IDENTITY.rotate_euler(&euler),
            Matrix4::IDENTITY.rotate_quaternion(&quaternion),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(quaternion.to_euler(), euler, epsilon = 1e-2);
    }
}

#[test]
fn test_transform_matches_euler_transformation_matrix() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    for _ in 0..50 {
        let position = Vector3::new(rng.gen_range(-10.0..10.0), 2.0, -3.0);
        let rotation = random_euler(&mut rng);
        let scale = Vector3::new(2.0, 0.5, 1.5);

        let transform = Transform::from_euler(position, rotation, scale);
        assert_abs_diff_eq!(
            transform.to_matrix(),
            Matrix4::transformation_matrix(&position, &rotation, &scale),
            epsilon = 1e-4
        );
    }
}

#[test]
fn test_matrix_serde_is_bit_exact() -> TestResult {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let m = random_matrix(&mut rng);

    let value = serde_json::to_value(m)?;
    assert!(value["m0"]["x"].is_number());
    assert!(value["m3"]["w"].is_number());

    let back: Matrix4 = serde_json::from_value(value)?;
    for (a, b) in m.to_array().iter().zip(back.to_array().iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    Ok(())
}

#[test]
fn test_quaternion_and_vector_serde() -> TestResult {
    let q = Quaternion::new(0.1, -0.2, 0.3, 0.9);
    let json = serde_json::to_string(&q)?;
    assert_eq!(serde_json::from_str::<Quaternion>(&json)?, q);

    let v: Vector3 = serde_json::from_str(r#"{ "x": 1.5, "y": -2.0, "z": 0.25 }"#)?;
    assert_eq!(v, Vector3::new(1.5, -2.0, 0.25));
    Ok(())
}

#[test]
fn test_perspective_maps_clip_planes() {
    let projection = Matrix4::perspective_matrix(90.0, 1.0, 1.0, 100.0);

    let near = projection.transform(&Vector4::new(0.0, 0.0, -1.0, 1.0));
    assert_abs_diff_eq!(near.z / near.w, -1.0, epsilon = 1e-5);

    let far = projection.transform(&Vector4::new(0.0, 0.0, -100.0, 1.0));
    assert_abs_diff_eq!(far.z / far.w, 1.0, epsilon = 1e-4);

    // 90 degree field of view: the top edge of the frustum lands on y = -1
    let top = projection.transform(&Vector4::new(0.0, 5.0, -5.0, 1.0));
    assert_abs_diff_eq!(top.y / top.w, -1.0, epsilon = 1e-5);
}

#[test]
fn test_look_at_places_target_in_front() -> TestResult {
    let eye = Vector3::new(3.0, 4.0, 0.0);
    let view = Matrix4::look_at(&eye, &Vector3::ZERO, &Vector3::UP)?;

    let target = view.transform(&Vector4::new(0.0, 0.0, 0.0, 1.0));
    assert_abs_diff_eq!(target.xyz(), Vector3::new(0.0, 0.0, -5.0), epsilon = 1e-5);

    let camera_origin = view.transform(&Vector4::from_vector3(eye, 1.0));
    assert_abs_diff_eq!(camera_origin.xyz(), Vector3::ZERO, epsilon = 1e-5);
    Ok(())
}

#[test]
fn test_ray_from_screen_center_follows_view() -> TestResult {
    let eye = Vector3::new(5.0, 0.0, 0.0);
    let view = Matrix4::look_at(&eye, &Vector3::ZERO, &Vector3::UP)?;
    let projection = Matrix4::perspective_matrix(60.0, 16.0 / 9.0, 0.1, 100.0);

    let mut ray = Ray::default();
    ray.update(&eye, &Vector2::new(0.5, 0.5), &view, &projection)?;

    assert_eq!(ray.origin(), eye);
    assert_abs_diff_eq!(ray.direction(), Vector3::LEFT, epsilon = 1e-5);
    assert_abs_diff_eq!(ray.point_on_ray(5.0), Vector3::ZERO, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_camera_picking_round_trip() -> TestResult {
    let mut camera = Camera::new(
        Vector3::new(1.0, 2.0, 5.0),
        Vector3::new(-10.0, 20.0, 0.0),
        ProjectionSettings {
            aspect_ratio: 4.0 / 3.0,
            ..ProjectionSettings::default()
        },
    );

    let mouse = Vector2::new(0.3, 0.8);
    let point = camera.update_ray(&mouse)?.point_on_ray(10.0);
    let screen = camera.world_to_screen(&point);
    assert_abs_diff_eq!(screen.xy(), mouse, epsilon = 1e-4);
    Ok(())
}
