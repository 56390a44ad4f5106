use super::error::KernelError;
use super::pulse::PulseDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcupointIntervention {
    pub name: &'static str,
    pub location: &'static str,
    pub method: &'static str,
}

/// Pattern, strategy and the treatment sequence for one descriptor.
/// `acupoints` order is the order they are worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisRecord {
    pub pattern: &'static str,
    pub strategy: &'static str,
    pub acupoints: Vec<AcupointIntervention>,
}

/// Anything the diagnosis engine can resolve a descriptor against.
pub trait RecordSource {
    fn lookup(&self, descriptor: PulseDescriptor) -> Result<&DiagnosisRecord, KernelError>;
}

/// Fixed descriptor -> record mapping. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    entries: Vec<(PulseDescriptor, DiagnosisRecord)>,
}

const fn point(
    name: &'static str,
    location: &'static str,
    method: &'static str,
) -> AcupointIntervention {
    AcupointIntervention { name, location, method }
}

impl ClassificationTable {
    pub fn new() -> Self {
        let entries = vec![
            (
                PulseDescriptor::Wiry,
                DiagnosisRecord {
                    pattern: "Liver qi stagnation / autonomic tone too high",
                    strategy: "Soothe the liver, regulate qi, relieve spasm",
                    acupoints: vec![
                        point(
                            "Taichong (LR3)",
                            "Depression behind the web between the big and second toe on the top of the foot",
                            "Reducing method (firm counter-clockwise kneading), 3 minutes",
                        ),
                        point(
                            "Neiguan (PC6)",
                            "Three finger-widths above the wrist crease",
                            "Even method, 2 minutes",
                        ),
                    ],
                },
            ),
            (
                PulseDescriptor::Slippery,
                DiagnosisRecord {
                    pattern: "Phlegm-damp / food retention / digestive overload",
                    strategy: "Strengthen the spleen, drain damp, transform phlegm",
                    acupoints: vec![
                        point(
                            "Fenglong (ST40)",
                            "Midpoint of the outer lower leg",
                            "Heavy pressure (strong stimulation), 3 minutes",
                        ),
                        point(
                            "Zhongwan (CV12)",
                            "Four cun above the navel",
                            "Warm moxibustion or clockwise kneading, 5 minutes",
                        ),
                    ],
                },
            ),
            (
                PulseDescriptor::DeepThready,
                DiagnosisRecord {
                    pattern: "Kidney qi deficiency / dual qi-blood deficiency / low system energy",
                    strategy: "Tonify qi and blood, lift basal metabolism",
                    acupoints: vec![
                        point(
                            "Zusanli (ST36)",
                            "Four finger-widths below the kneecap eye",
                            "Tonifying method (gentle clockwise kneading or moxa), 5 minutes",
                        ),
                        point(
                            "Qihai (CV6)",
                            "1.5 cun below the navel",
                            "Still pressure or warm compress",
                        ),
                    ],
                },
            ),
            (
                PulseDescriptor::Rapid,
                DiagnosisRecord {
                    pattern: "Heat pattern / inflammatory response / hypermetabolism",
                    strategy: "Clear heat, cool the blood, lower system entropy",
                    acupoints: vec![
                        point(
                            "Quchi (LI11)",
                            "Outer end of the elbow crease",
                            "Reducing method (strong stimulation), 2 minutes",
                        ),
                        point(
                            "Hegu (LI4)",
                            "Web between thumb and index finger",
                            "Intermittent point pressing",
                        ),
                    ],
                },
            ),
            (
                PulseDescriptor::Empty,
                DiagnosisRecord {
                    pattern: "Qi and blood depletion / weak circulatory drive",
                    strategy: "Greatly tonify source qi, activate the pump",
                    acupoints: vec![
                        point(
                            "Baihui (GV20)",
                            "Top centre of the head",
                            "Light pressure, 1 minute",
                        ),
                        point(
                            "Guanyuan (CV4)",
                            "Three cun below the navel",
                            "Long warm moxibustion",
                        ),
                    ],
                },
            ),
        ];

        Self { entries }
    }

    /// Menu-ordered view of every entry.
    pub fn entries(&self) -> impl Iterator<Item = (PulseDescriptor, &DiagnosisRecord)> {
        self.entries.iter().map(|(d, r)| (*d, r))
    }

    pub fn descriptors(&self) -> Vec<PulseDescriptor> {
        self.entries.iter().map(|(d, _)| *d).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for ClassificationTable {
    fn lookup(&self, descriptor: PulseDescriptor) -> Result<&DiagnosisRecord, KernelError> {
        self.entries
            .iter()
            .find(|(d, _)| *d == descriptor)
            .map(|(_, record)| record)
            .ok_or_else(|| {
                tracing::error!(?descriptor, "classification table is not total");
                KernelError::UnknownDescriptor(descriptor)
            })
    }
}
