//! Mock collaborators for Skiff development and testing.
//!
//! Provides in-memory implementations of the core collaborator traits:
//! [`MockWorld`] (HashMap-backed voxel world with sign text),
//! [`TestActor`], [`RecordingNotifier`], [`BoxRegion`] with
//! [`StaticRegionProvider`], and [`FixedClaimPolicy`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::RefCell;
use std::collections::HashMap;

use skiff_core::{
    ActorIdentity, ClaimPolicy, HeightLimits, MaterialId, NotificationSink, ProtectedRegion,
    RegionProvider, WorldAccessor, WorldPos,
};

/// Material id conventionally used for empty space in test worlds.
pub const AIR: MaterialId = MaterialId::new(0, 0);

/// In-memory voxel world backed by a `HashMap`.
///
/// Unset positions read as [`AIR`] (or a configured default). Populate
/// with [`set`](MockWorld::set) / [`fill`](MockWorld::fill) and attach
/// sign text with [`set_sign`](MockWorld::set_sign) before passing to
/// code under test.
pub struct MockWorld {
    voxels: HashMap<WorldPos, MaterialId>,
    signs: HashMap<WorldPos, [String; 4]>,
    default: MaterialId,
}

impl MockWorld {
    pub fn new() -> Self {
        Self {
            voxels: HashMap::new(),
            signs: HashMap::new(),
            default: AIR,
        }
    }

    /// Use a material other than [`AIR`] for unset positions.
    pub fn with_default(mut self, material: MaterialId) -> Self {
        self.default = material;
        self
    }

    /// Place one voxel.
    pub fn set(&mut self, pos: WorldPos, material: MaterialId) {
        self.voxels.insert(pos, material);
    }

    /// Fill the inclusive box `[min, max]` with one material.
    pub fn fill(&mut self, min: WorldPos, max: WorldPos, material: MaterialId) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set(WorldPos::new(x, y, z), material);
                }
            }
        }
    }

    /// Attach sign text to a position (the material must be set
    /// separately to something in the policy's sign set).
    pub fn set_sign(&mut self, pos: WorldPos, lines: [&str; 4]) {
        self.signs.insert(pos, lines.map(str::to_owned));
    }

    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }
}

impl Default for MockWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldAccessor for MockWorld {
    fn material_at(&self, pos: WorldPos) -> MaterialId {
        self.voxels.get(&pos).copied().unwrap_or(self.default)
    }

    fn sign_lines_at(&self, pos: WorldPos) -> [String; 4] {
        self.signs
            .get(&pos)
            .cloned()
            .unwrap_or_else(|| std::array::from_fn(|_| String::new()))
    }
}

/// Actor with a fixed name and override flag.
pub struct TestActor {
    name: Option<String>,
    has_override: bool,
}

impl TestActor {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            has_override: false,
        }
    }

    /// An automated detection with no requesting actor.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            has_override: false,
        }
    }

    pub fn with_override(mut self) -> Self {
        self.has_override = true;
        self
    }
}

impl ActorIdentity for TestActor {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn has_override(&self) -> bool {
        self.has_override
    }
}

/// Notification sink that records every message for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(fragment))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

/// Axis-aligned box region with a fixed authorization requirement.
pub struct BoxRegion {
    min: WorldPos,
    max: WorldPos,
    /// Actors named here are authorized; everyone else needs override.
    authorized: Vec<String>,
    requires_authorization: bool,
}

impl BoxRegion {
    /// A region that denies every unauthorized actor.
    pub fn restricted(min: WorldPos, max: WorldPos) -> Self {
        Self {
            min,
            max,
            authorized: Vec::new(),
            requires_authorization: true,
        }
    }

    /// A region with no pilot restriction at all.
    pub fn open(min: WorldPos, max: WorldPos) -> Self {
        Self {
            min,
            max,
            authorized: Vec::new(),
            requires_authorization: false,
        }
    }

    pub fn authorize(mut self, name: &str) -> Self {
        self.authorized.push(name.to_owned());
        self
    }
}

impl ProtectedRegion for BoxRegion {
    fn min(&self) -> WorldPos {
        self.min
    }

    fn max(&self) -> WorldPos {
        self.max
    }

    fn requires_pilot_authorization(&self, actor: &dyn ActorIdentity) -> bool {
        if !self.requires_authorization {
            return false;
        }
        match actor.name() {
            Some(name) => !self.authorized.iter().any(|a| a == name),
            None => true,
        }
    }

    fn contains(&self, pos: WorldPos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }
}

/// Region provider over a fixed list of [`BoxRegion`]s.
#[derive(Default)]
pub struct StaticRegionProvider {
    regions: Vec<BoxRegion>,
}

impl StaticRegionProvider {
    pub fn new(regions: Vec<BoxRegion>) -> Self {
        Self { regions }
    }
}

impl RegionProvider for StaticRegionProvider {
    fn regions_overlapping(&self, min: WorldPos, max: WorldPos) -> Vec<&dyn ProtectedRegion> {
        self.regions
            .iter()
            .filter(|r| {
                !(r.min().x > max.x
                    || r.max().x < min.x
                    || r.min().y > max.y
                    || r.max().y < min.y
                    || r.min().z > max.z
                    || r.max().z < min.z)
            })
            .map(|r| r as &dyn ProtectedRegion)
            .collect()
    }
}

/// Claim policy returning fixed height limits, recording each query.
pub struct FixedClaimPolicy {
    limits: Option<HeightLimits>,
    queries: RefCell<usize>,
}

impl FixedClaimPolicy {
    pub fn new(limits: Option<HeightLimits>) -> Self {
        Self {
            limits,
            queries: RefCell::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        *self.queries.borrow()
    }
}

impl ClaimPolicy for FixedClaimPolicy {
    fn height_limits(&self) -> Option<HeightLimits> {
        *self.queries.borrow_mut() += 1;
        self.limits
    }
}
