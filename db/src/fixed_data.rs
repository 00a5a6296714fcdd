//! The machine registry a fresh store is seeded with.
//!
//! Clients compare against this set verbatim, so ids, kinds and component
//! lists here must not drift.

use mcontrol_common::views::{
    Device, Machine, MachineKind, MachineRegistry, Segment, VibrationPump,
};

/// Ids of the segment-based lines. Each one also has a grid-based tyre
/// station named `neumaticos-<id lowercased>`.
pub const SEGMENT_LINES: [&str; 5] = ["S", "R", "T", "U", "W"];

/// Segments per side of a segment-based machine (`F1..F14` and `W1..W14`).
pub const SEGMENTS_PER_SIDE: usize = 14;

pub const BAG_DEVICES: [(&str, &str); 4] = [
    ("alimentador", "Alimentador"),
    ("selladora", "Selladora"),
    ("cortadora", "Cortadora"),
    ("apilador", "Apilador"),
];

pub const GRID_DEVICES: [(&str, &str); 4] = [
    ("cuerpo-control", "Cuerpo de control"),
    ("ev", "EV"),
    ("generador-vacio", "Generador de vacío"),
    ("tubing", "Tubing"),
];

/// Builds the full seeded registry: five segment-based machines, the bag
/// machine, the aligner and five tyre stations.
pub fn machines() -> MachineRegistry {
    let segment_based = SEGMENT_LINES.iter().map(|line| segment_machine(line));
    let grid_based = SEGMENT_LINES.iter().map(|line| grid_machine(line));

    segment_based
        .chain([bag_machine(), aligner()])
        .chain(grid_based)
        .collect()
}

fn segment_machine(line: &str) -> Machine {
    let segments = ["F", "W"]
        .iter()
        .flat_map(|side| {
            (1..=SEGMENTS_PER_SIDE).map(move |n| Segment {
                id: format!("{side}{n}").into(),
                active: true,
            })
        })
        .collect();

    Machine {
        id: line.to_string(),
        name: format!("Máquina {line}"),
        kind: MachineKind::SegmentBased,
        operational: true,
        segments: Some(segments),
        vibration_pump: Some(VibrationPump { active: true }),
        devices: None,
    }
}

fn bag_machine() -> Machine {
    Machine {
        id: "bolsas".into(),
        name: "Bolsas".into(),
        kind: MachineKind::DeviceBased,
        operational: true,
        segments: None,
        vibration_pump: None,
        devices: Some(devices(&BAG_DEVICES)),
    }
}

fn aligner() -> Machine {
    Machine {
        id: "alineador".into(),
        name: "Alineador".into(),
        kind: MachineKind::Simple,
        operational: true,
        segments: None,
        vibration_pump: None,
        devices: None,
    }
}

fn grid_machine(line: &str) -> Machine {
    Machine {
        id: format!("neumaticos-{}", line.to_lowercase()),
        name: format!("Neumáticos {line}"),
        kind: MachineKind::GridBased,
        operational: true,
        segments: None,
        vibration_pump: None,
        devices: Some(devices(&GRID_DEVICES)),
    }
}

fn devices(list: &[(&str, &str)]) -> Vec<Device> {
    list.iter()
        .map(|(id, name)| Device {
            id: (*id).into(),
            name: (*name).into(),
            active: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_exactly_the_twelve_machines() {
        let registry = machines();

        let mut ids: Vec<_> = registry.ids().collect();
        ids.sort();

        let mut expected = vec![
            "S",
            "R",
            "T",
            "U",
            "W",
            "bolsas",
            "alineador",
            "neumaticos-s",
            "neumaticos-r",
            "neumaticos-t",
            "neumaticos-u",
            "neumaticos-w",
        ];
        expected.sort();

        assert_eq!(ids, expected);
    }

    #[test]
    fn test_segment_machines_have_28_segments_and_pump() {
        let registry = machines();

        for line in SEGMENT_LINES {
            let machine = registry.get(line).unwrap();
            assert_eq!(machine.kind, MachineKind::SegmentBased);
            assert_eq!(machine.vibration_pump, Some(VibrationPump { active: true }));
            assert_eq!(machine.devices, None);

            let segments = machine.segments.as_ref().unwrap();
            assert_eq!(segments.len(), 28);
            assert_eq!(segments[0].id, "F1");
            assert_eq!(segments[13].id, "F14");
            assert_eq!(segments[14].id, "W1");
            assert_eq!(segments[27].id, "W14");
            assert!(segments.iter().all(|s| s.active));
        }
    }

    #[test]
    fn test_grid_machines_share_device_ids() {
        let registry = machines();

        for line in ["s", "r", "t", "u", "w"] {
            let machine = registry.get(&format!("neumaticos-{line}")).unwrap();
            assert_eq!(machine.kind, MachineKind::GridBased);
            assert_eq!(machine.segments, None);

            let ids: Vec<_> = machine
                .devices
                .as_ref()
                .unwrap()
                .iter()
                .map(|d| d.id.to_string())
                .collect();
            assert_eq!(ids, vec!["cuerpo-control", "ev", "generador-vacio", "tubing"]);
        }
    }

    #[test]
    fn test_bag_machine_and_aligner() {
        let registry = machines();

        let bolsas = registry.get("bolsas").unwrap();
        assert_eq!(bolsas.kind, MachineKind::DeviceBased);
        assert_eq!(bolsas.devices.as_ref().unwrap().len(), 4);

        let alineador = registry.get("alineador").unwrap();
        assert_eq!(alineador.kind, MachineKind::Simple);
        assert_eq!(alineador.segments, None);
        assert_eq!(alineador.vibration_pump, None);
        assert_eq!(alineador.devices, None);
    }
}
