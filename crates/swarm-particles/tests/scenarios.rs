use swarm_core::Vec3;
use swarm_particles::{Particle, ParticleRng, SimParams, Stepper, MAX_STEP_DELTA};

fn single_particle_at_origin(params: &SimParams) -> Stepper {
    let mut stepper = Stepper::new();
    stepper
        .sync(params, &mut ParticleRng::new(11))
        .expect("pool should build");
    stepper.pool_mut().particles_mut()[0] = Particle::new(Vec3::ZERO, Vec3::ZERO, 0.0);
    stepper
}

#[test]
fn origin_maps_onto_constant() {
    let params = SimParams {
        count: 1,
        scale: 24.0,
        attraction: 0.0,
        speed: 24.0,
        c_re: -0.7,
        c_im: 0.27,
        ..Default::default()
    };
    let mut stepper = single_particle_at_origin(&params);

    assert!(stepper.step(1.0 / 30.0, &params));

    // 1/30 is just over the clamp, so the clock reads exactly the limit
    let t = stepper.clock();
    assert_eq!(t, MAX_STEP_DELTA);

    let p = &stepper.pool().particles()[0];
    assert!((p.position.x - -16.8).abs() < 1e-4, "x = {}", p.position.x);
    assert!((p.position.y - 6.48).abs() < 1e-4, "y = {}", p.position.y);
    let z = (t * 0.5).sin() * 7.2;
    assert!((p.position.z - z).abs() < 1e-5, "z = {}", p.position.z);
    assert_eq!(p.velocity, Vec3::ZERO);

    let inst = stepper.instance_data()[0];
    assert_eq!(inst.position(), p.position);
    assert_eq!(inst.size(), params.point_size);
}

#[test]
fn one_second_gap_is_clamped() {
    let params = SimParams {
        count: 200,
        attraction: 2.0,
        speed: 4.0,
        ..Default::default()
    };
    let mut stepper = Stepper::new();
    stepper.sync(&params, &mut ParticleRng::new(5)).unwrap();

    // Predict the remapped positions, then bound how far integration can move them
    let mut expected = stepper.pool().particles().to_vec();
    for p in &mut expected {
        swarm_particles::stepper::update_particle(p, MAX_STEP_DELTA, MAX_STEP_DELTA, &params);
    }

    stepper.step(1.0, &params);
    assert_eq!(stepper.clock(), MAX_STEP_DELTA);
    for (got, want) in stepper.pool().particles().iter().zip(&expected) {
        assert_eq!(got, want);
    }

    // Starting at rest, a step moves a particle |remapped| * attraction * dt^2 * speed
    // away from its remapped point, with dt capped at the clamp
    let mut probe = Particle::new(Vec3::new(6.0, 6.0, 0.0), Vec3::ZERO, 0.0);
    swarm_particles::stepper::update_particle(&mut probe, 0.0, MAX_STEP_DELTA, &params);
    let (rx, ry) = swarm_particles::quadratic_map(0.25, 0.25, params.c_re, params.c_im);
    let remapped = Vec3::new(rx * params.scale, ry * params.scale, 0.0);
    let moved = (probe.position - remapped).length();
    let bound = remapped.length() * params.attraction * MAX_STEP_DELTA * MAX_STEP_DELTA * params.speed;
    assert!(moved <= bound * 1.001 + 1e-6, "moved {moved} > bound {bound}");
}

#[test]
fn pause_freezes_everything() {
    let mut params = SimParams {
        count: 100,
        ..Default::default()
    };
    let mut stepper = Stepper::new();
    let mut rng = ParticleRng::new(8);
    stepper.sync(&params, &mut rng).unwrap();
    stepper.step(0.016, &params);

    let particles = stepper.pool().particles().to_vec();
    let clock = stepper.clock();

    params.paused = true;
    assert!(!stepper.sync(&params, &mut rng).unwrap());
    for _ in 0..50 {
        stepper.step(0.016, &params);
    }

    assert_eq!(stepper.pool().particles(), &particles[..]);
    assert_eq!(stepper.clock(), clock);
}

#[test]
fn identical_state_steps_identically() {
    let params = SimParams {
        count: 300,
        ..Default::default()
    };
    let mut a = Stepper::new();
    let mut b = Stepper::new();
    a.sync(&params, &mut ParticleRng::new(99)).unwrap();
    b.sync(&params, &mut ParticleRng::new(99)).unwrap();

    for frame in 0..20 {
        let dt = 0.01 + frame as f32 * 0.001;
        a.step(dt, &params);
        b.step(dt, &params);
    }

    let bits = |s: &Stepper| -> Vec<u8> { s.instance_bytes().to_vec() };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.clock().to_bits(), b.clock().to_bits());
}

#[test]
fn params_file_drives_stepper() {
    let params = SimParams::from_toml_str(
        r#"
[simulation]
count = 3
spawn_radius = 1.5
c_re = "-0.8"
c_im = "0.156"
"#,
    )
    .unwrap();

    let mut stepper = Stepper::new();
    assert!(stepper.sync(&params, &mut ParticleRng::new(4)).unwrap());
    assert_eq!(stepper.pool().len(), 3);
    for p in stepper.pool().particles() {
        assert!(p.position.to_array().iter().all(|c| c.abs() <= 1.5));
    }
}
