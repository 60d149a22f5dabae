//! Line bags and the `(agent, outcome)` lookup table.

use fc_core::{AgentId, NeedKind, SessionRng};

/// Probability the keeper grumbles instead of acknowledging a request.
const COMPLAINT_CHANCE: f64 = 0.2;

// ── Outcome ──────────────────────────────────────────────────────────────────

/// The situations an agent can speak about.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// The agent just asked for something.
    Request(NeedKind),
    /// A correct delivery landed.
    Delivered,
    /// The wrong item was offered.
    WrongItem,
}

// ── LineBag ──────────────────────────────────────────────────────────────────

/// A bag of interchangeable flavor lines; selection is a uniform pick.
#[derive(Clone, Debug, Default)]
pub struct LineBag(Vec<String>);

impl LineBag {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(lines.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Uniform random pick; `None` only for an empty bag.
    pub fn pick<'a>(&'a self, rng: &mut SessionRng) -> Option<&'a str> {
        rng.choose(&self.0).map(String::as_str)
    }
}

// ── AgentVoice ───────────────────────────────────────────────────────────────

/// All the bags for one agent, plus the keeper's acknowledgement lines for
/// that agent (the keeper addresses each cat differently).
#[derive(Clone, Debug, Default)]
pub struct AgentVoice {
    pub request_food:  LineBag,
    pub request_water: LineBag,
    pub delivered:     LineBag,
    pub wrong_item:    LineBag,
    pub keeper_ack:    LineBag,
}

impl AgentVoice {
    fn bag(&self, outcome: Outcome) -> &LineBag {
        match outcome {
            Outcome::Request(NeedKind::Food) => &self.request_food,
            Outcome::Request(NeedKind::Water) => &self.request_water,
            Outcome::Delivered => &self.delivered,
            Outcome::WrongItem => &self.wrong_item,
        }
    }
}

// ── DialogueTable ────────────────────────────────────────────────────────────

/// Per-agent voices indexed by `AgentId`, plus the keeper's shared complaint
/// bag.  Built once at engine construction.
#[derive(Clone, Debug)]
pub struct DialogueTable {
    voices: Vec<AgentVoice>,
    keeper_complaints: LineBag,
}

impl DialogueTable {
    /// `voices` must be in roster order (index = `AgentId`).
    pub fn new(voices: Vec<AgentVoice>, keeper_complaints: LineBag) -> Self {
        Self { voices, keeper_complaints }
    }

    /// A ready-made table for `agent_count` agents, alternating a soft-spoken
    /// and a loud persona.  Applications with their own script supply their
    /// own voices instead.
    pub fn stock(agent_count: usize) -> Self {
        let gentle = AgentVoice {
            request_food: LineBag::new([
                "Could I have a little something to eat?",
                "My bowl is empty...",
                "Mrrp. Dinner time?",
            ]),
            request_water: LineBag::new([
                "My whiskers are parched.",
                "A sip of water, please?",
                "The water bowl is dry...",
            ]),
            delivered: LineBag::new([
                "Thank you! You're the best.",
                "Purrfect, just what I wanted.",
            ]),
            wrong_item: LineBag::new([
                "That's... not what I asked for.",
                "Um, the other one, please?",
            ]),
            keeper_ack: LineBag::new([
                "Coming right up, sweetheart.",
                "Of course, little one.",
                "There in a second!",
            ]),
        };
        let loud = AgentVoice {
            request_food: LineBag::new([
                "FOOD! NOW!",
                "I am STARVING over here!",
                "Where is my dinner?!",
            ]),
            request_water: LineBag::new([
                "WATER! I'm a desert!",
                "Thirsty! Hurry up!",
                "The bowl! Fill it!",
            ]),
            delivered: LineBag::new([
                "FINALLY! That's the stuff!",
                "About time! Delicious!",
            ]),
            wrong_item: LineBag::new([
                "NOT THAT! THE OTHER ONE!",
                "Are you even listening?!",
            ]),
            keeper_ack: LineBag::new([
                "Alright, alright, I'm coming!",
                "Patience, you menace.",
                "Yes yes, right away.",
            ]),
        };

        let voices = (0..agent_count)
            .map(|i| if i % 2 == 0 { gentle.clone() } else { loud.clone() })
            .collect();

        let keeper_complaints = LineBag::new([
            "Again? You just ate!",
            "I can't keep up with you two!",
            "Help yourselves for once!",
        ]);

        Self { voices, keeper_complaints }
    }

    pub fn agent_count(&self) -> usize {
        self.voices.len()
    }

    /// A line for `agent` reacting to `outcome`, or `None` if the agent is
    /// unknown or its bag is empty (the bubble is simply skipped).
    pub fn agent_line<'a>(
        &'a self,
        agent: AgentId,
        outcome: Outcome,
        rng: &mut SessionRng,
    ) -> Option<&'a str> {
        self.voices.get(agent.index())?.bag(outcome).pick(rng)
    }

    /// The keeper's reaction to `agent` asking for something: usually an
    /// acknowledgement addressed to that cat, occasionally a complaint.
    pub fn keeper_line<'a>(&'a self, agent: AgentId, rng: &mut SessionRng) -> Option<&'a str> {
        let voice = self.voices.get(agent.index())?;
        if !self.keeper_complaints.is_empty() && rng.gen_bool(COMPLAINT_CHANCE) {
            self.keeper_complaints.pick(rng)
        } else {
            voice.keeper_ack.pick(rng)
        }
    }
}
