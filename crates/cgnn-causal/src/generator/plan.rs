use crate::graph::Topology;

/// Where a mechanism reads its parent values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conditioning {
    /// Parents are the real observed columns; only targets are generated.
    Observed,
    /// Parents are the generated columns; the whole joint is generated.
    Generated,
}

/// One generated column and the columns it is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub target: usize,
    pub parents: Vec<usize>,
}

/// The wiring of a generator model: columns, generation steps in order, and
/// the conditioning mode.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    columns: Vec<String>,
    steps: Vec<PlanStep>,
    conditioning: Conditioning,
}

impl GenerationPlan {
    /// Two-column hypothesis `cause -> effect`: column 1 generated from observed column 0.
    pub fn pairwise(cause: &str, effect: &str) -> Self {
        Self {
            columns: vec![cause.to_string(), effect.to_string()],
            steps: vec![PlanStep {
                target: 1,
                parents: vec![0],
            }],
            conditioning: Conditioning::Observed,
        }
    }

    /// Full-graph hypothesis: every node generated in topological order.
    pub fn from_topology(topology: &Topology) -> Self {
        let steps = topology
            .order()
            .iter()
            .map(|&node| PlanStep {
                target: node,
                parents: topology.parents(node).to_vec(),
            })
            .collect();
        Self {
            columns: topology.names().to_vec(),
            steps,
            conditioning: Conditioning::Generated,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn conditioning(&self) -> Conditioning {
        self.conditioning
    }

    /// Short description used in spans and logs.
    pub fn label(&self) -> String {
        match self.conditioning {
            Conditioning::Observed => {
                let targets: Vec<&str> = self
                    .steps
                    .iter()
                    .map(|s| self.columns[s.target].as_str())
                    .collect();
                let parents: Vec<&str> = self
                    .steps
                    .iter()
                    .flat_map(|s| s.parents.iter().map(|&p| self.columns[p].as_str()))
                    .collect();
                format!("{}->{}", parents.join(","), targets.join(","))
            }
            Conditioning::Generated => format!("joint({})", self.columns.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairwise_plan_generates_the_effect() {
        let plan = GenerationPlan::pairwise("x", "y");
        assert_eq!(plan.steps().len(), 1);
        assert_eq!(plan.steps()[0].target, 1);
        assert_eq!(plan.conditioning(), Conditioning::Observed);
        assert_eq!(plan.label(), "x->y");
    }
}
