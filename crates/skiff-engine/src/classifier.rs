//! Compiled per-detection view of the structural policy.
//!
//! Built once per detection call: selectors expand into concrete
//! variant sets, sign text is case-normalised, and quota rules become
//! an arena of shared counters referenced by index from each material.
//! Nothing here is shared across detection calls — classifier state is
//! scan-local by construction.

use indexmap::{IndexMap, IndexSet};
use skiff_core::{MaterialId, MaterialSelector, StructuralPolicy, Threshold};

/// One shared composition counter.
///
/// Every material of the originating [`QuotaRule`](skiff_core::QuotaRule)
/// points at the same counter, so the bounds apply to the union of those
/// materials. Counters live in an arena (`Vec`) and are referenced by
/// index, which also makes "evaluate each quota exactly once" a plain
/// iteration over the arena.
#[derive(Clone, Debug)]
pub struct QuotaCounter {
    /// Rule name for violation reports.
    pub name: String,
    /// Accepted voxels observed so far.
    pub count: usize,
    /// Decoded lower bound, if configured.
    pub min: Option<Threshold>,
    /// Decoded upper bound, if configured.
    pub max: Option<Threshold>,
}

/// Compiled structural policy, ready for per-voxel queries.
pub struct BlockClassifier {
    allowed: IndexSet<MaterialId>,
    forbidden: IndexSet<MaterialId>,
    water: IndexSet<MaterialId>,
    signs: IndexSet<MaterialId>,
    paired: IndexSet<MaterialId>,
    dynamic: IndexSet<MaterialId>,
    forbidden_text: IndexSet<String>,
    quota_index: IndexMap<MaterialId, usize>,
    quotas: Vec<QuotaCounter>,
    dynamic_quota: Option<usize>,
    min_size: usize,
    max_size: usize,
    require_water_contact: bool,
    dynamic_speed_factor: f64,
}

fn expand(selectors: &[MaterialSelector]) -> IndexSet<MaterialId> {
    selectors.iter().flat_map(|s| s.variants()).collect()
}

impl BlockClassifier {
    /// Compile a validated policy.
    pub fn compile(policy: &StructuralPolicy) -> Self {
        let mut quota_index = IndexMap::new();
        let mut quotas = Vec::with_capacity(policy.quotas.len());
        for rule in &policy.quotas {
            let index = quotas.len();
            quotas.push(QuotaCounter {
                name: rule.name.clone(),
                count: 0,
                min: rule.min.map(|spec| spec.decode()),
                max: rule.max.map(|spec| spec.decode()),
            });
            for selector in &rule.materials {
                for variant in selector.variants() {
                    quota_index.insert(variant, index);
                }
            }
        }

        // The dynamic family is only tracked when its factor is nonzero.
        let dynamic = match (policy.dynamic_family, policy.dynamic_speed_factor) {
            (Some(family), factor) if factor != 0.0 => {
                expand(&[MaterialSelector::Family(family)])
            }
            _ => IndexSet::new(),
        };
        let dynamic_quota = dynamic
            .iter()
            .find_map(|variant| quota_index.get(variant).copied());

        let forbidden_text = policy
            .forbidden_sign_text
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect();

        Self {
            allowed: expand(&policy.allowed),
            forbidden: expand(&policy.forbidden),
            water: expand(&policy.water),
            signs: expand(&policy.signs),
            paired: expand(&policy.paired),
            dynamic,
            forbidden_text,
            quota_index,
            quotas,
            dynamic_quota,
            min_size: policy.min_size,
            max_size: policy.max_size,
            require_water_contact: policy.require_water_contact,
            dynamic_speed_factor: policy.dynamic_speed_factor,
        }
    }

    /// Whether a craft may be built of this material.
    pub fn is_allowed(&self, material: MaterialId) -> bool {
        self.allowed.contains(&material)
    }

    /// Whether this material aborts detection outright.
    pub fn is_forbidden(&self, material: MaterialId) -> bool {
        self.forbidden.contains(&material)
    }

    /// Whether this material counts as water contact.
    pub fn is_water(&self, material: MaterialId) -> bool {
        self.water.contains(&material)
    }

    /// Whether this material carries readable sign text.
    pub fn is_sign(&self, material: MaterialId) -> bool {
        self.signs.contains(&material)
    }

    /// Whether this material is paired-placement-restricted.
    pub fn is_paired(&self, material: MaterialId) -> bool {
        self.paired.contains(&material)
    }

    /// Whether this material belongs to the dynamic-speed family.
    pub fn is_dynamic(&self, material: MaterialId) -> bool {
        self.dynamic.contains(&material)
    }

    /// Whether a case-normalised sign line matches the forbidden set.
    pub fn forbidden_text_matches(&self, line: &str) -> bool {
        self.forbidden_text.contains(line)
    }

    /// Bump the shared quota counter for this material, if any rule
    /// covers it.
    pub fn record_quota(&mut self, material: MaterialId) {
        if let Some(&index) = self.quota_index.get(&material) {
            self.quotas[index].count += 1;
        }
    }

    /// The quota counter arena, each distinct counter exactly once.
    pub fn quota_counters(&self) -> &[QuotaCounter] {
        &self.quotas
    }

    /// Arena index of the quota rule covering the dynamic family.
    pub fn dynamic_quota_index(&self) -> Option<usize> {
        self.dynamic_quota
    }

    /// Configured minimum total size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Configured maximum total size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether the policy requires water contact.
    pub fn require_water_contact(&self) -> bool {
        self.require_water_contact
    }

    /// Dynamic speed factor; `0.0` when disabled.
    pub fn dynamic_speed_factor(&self) -> f64 {
        self.dynamic_speed_factor
    }
}
