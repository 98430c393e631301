use super::config::Hyper;
use super::heuristic;
use super::master::MasterTable;
use super::session::Session;
use super::sub::SubTable;
use crate::battle::action::{self, ActionId, Choice};
use crate::battle::snapshot::Snapshot;
use crate::encode;
use rand::Rng;
use std::path::Path;

/// the learning agent: two value tables plus tuning. all per-match state
/// lives in the caller's `Session`; the tables are the only thing shared
/// across matches, and `&mut self` serializes their mutation.
#[derive(Debug, Default)]
pub struct Agent {
    pub master: MasterTable,
    pub sub: SubTable,
    pub hyper: Hyper,
}

impl Agent {
    pub fn new(hyper: Hyper) -> Self {
        Self {
            master: MasterTable::default(),
            sub: SubTable::default(),
            hyper,
        }
    }

    /// one decision point. computes the shaped reward for the previous
    /// decision, runs the backward trace update, then selects and
    /// resolves the next action. `None` means the engine offered no
    /// legal action and the caller must fall back to an engine default.
    pub fn decide<R: Rng>(
        &mut self,
        session: &mut Session,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Option<Choice> {
        let reward = session.shaper.observe(snapshot);

        let key = encode::master(snapshot);
        let legal = action::legal(snapshot);
        if legal.is_empty() {
            return None;
        }
        if self.hyper.heuristic_init {
            heuristic::seed_master(
                &mut self.master,
                &key,
                &legal,
                snapshot,
                self.hyper.master_temperature,
            );
        }
        let (chosen, is_greedy) = self
            .master
            .select(&key, &legal, self.hyper.epsilon, rng)
            .expect("legal set checked nonempty");
        let max_next_q = self.master.max_over(&key, &legal);

        if let Some(ref last) = session.last {
            session.traces.update(
                &mut self.master,
                &mut self.sub,
                last,
                session.last_sub.as_ref(),
                session.last_sub_greedy,
                reward,
                max_next_q,
                is_greedy,
                &self.hyper,
            );
        }

        session.last = Some((key, chosen));
        // the switch context is one-shot, but its greediness carries over:
        // the sub trace chain keeps decaying through direct-move turns and
        // only an exploratory step (or session reset) severs it
        session.last_sub = None;

        match chosen {
            ActionId::Slot(slot) => {
                let mv = action::resolve_slot(snapshot, slot)?;
                Some(Choice::Move(mv.id.clone()))
            }
            ActionId::Delegate => self.delegate(session, snapshot, is_greedy, rng),
        }
    }

    /// the switch specialist: evaluate every candidate, pick epsilon-
    /// greedily, and record the chosen context with its coupled
    /// greediness for the next trace update
    fn delegate<R: Rng>(
        &mut self,
        session: &mut Session,
        snapshot: &Snapshot,
        parent_greedy: bool,
        rng: &mut R,
    ) -> Option<Choice> {
        let keys: Vec<_> = snapshot
            .switch_candidates
            .iter()
            .map(|cand| encode::sub(snapshot, cand))
            .collect();
        if self.hyper.heuristic_init {
            heuristic::seed_sub(&mut self.sub, snapshot, &keys, self.hyper.sub_temperature);
        }
        let (idx, sub_greedy) = self.sub.select(&keys, self.hyper.epsilon, rng)?;
        session.last_sub = Some(keys.into_iter().nth(idx).expect("index from select"));
        session.last_sub_greedy = sub_greedy && parent_greedy;
        Some(Choice::Switch(idx))
    }

    /// match over: fold the terminal reward into the final shaped step
    /// reward, nudge the last switch context, run the closing trace
    /// update against a zero-valued terminal state, and reset the session
    pub fn finish(&mut self, session: &mut Session, snapshot: &Snapshot, won: bool) {
        let step = session.shaper.observe(snapshot);
        let outcome = if won {
            crate::TERMINAL_REWARD
        } else {
            -crate::TERMINAL_REWARD
        };
        let reward = step + outcome;

        if let Some(ref context) = session.last_sub {
            self.sub.nudge(context, reward, crate::SWITCH_NUDGE_ALPHA);
        }
        if let Some(ref last) = session.last {
            session.traces.update(
                &mut self.master,
                &mut self.sub,
                last,
                session.last_sub.as_ref(),
                session.last_sub_greedy,
                reward,
                0.0,
                true,
                &self.hyper,
            );
        }
        session.reset();
    }

    /// match abandoned (engine timeout): neither win nor loss. the
    /// pending context and traces are discarded without attribution.
    pub fn abandon(&self, session: &mut Session) {
        session.reset();
    }

    /// serialize both tables; failures surface to the caller
    pub fn checkpoint(&self, path: &Path) -> std::io::Result<()> {
        crate::save::checkpoint::save(path, &self.master, &self.sub)
    }

    /// restore both tables; a missing or corrupt checkpoint starts empty
    pub fn restore(path: &Path, hyper: Hyper) -> Self {
        let (master, sub) = crate::save::checkpoint::load(path);
        Self { master, sub, hyper }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::element::Element;
    use crate::battle::unit::{Boosts, Move, MoveKind, Stats, Unit};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn mv(id: &str) -> Move {
        Move {
            id: id.to_string(),
            power: 80.0,
            accuracy: 1.0,
            element: Element::Normal,
            kind: MoveKind::Physical,
        }
    }

    fn unit(species: &str, hp: u32) -> Unit {
        Unit {
            species: species.to_string(),
            hp,
            max_hp: 100,
            fainted: false,
            status: None,
            boosts: Boosts::default(),
            ability: None,
            elements: vec![Element::Normal],
            stats: Stats {
                atk: 100,
                def: 100,
                spa: 100,
                spd: 100,
                spe: 100,
            },
            moves: vec![mv("slash"), mv("tackle")],
        }
    }

    fn snapshot(own_hp: u32, foe_hp: u32) -> Snapshot {
        Snapshot {
            own_active: Some(unit("tauros", own_hp)),
            foe_active: Some(unit("chansey", foe_hp)),
            own_roster: vec![unit("tauros", own_hp)],
            foe_roster: vec![unit("chansey", foe_hp)],
            available_moves: vec!["slash".to_string(), "tackle".to_string()],
            ..Snapshot::default()
        }
    }

    fn greedy_agent() -> Agent {
        Agent::new(Hyper {
            epsilon: 0.0,
            heuristic_init: false,
            ..Hyper::default()
        })
    }

    #[test]
    fn no_action_available_is_reported_not_fatal() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(agent
            .decide(&mut session, &Snapshot::default(), &mut rng)
            .is_none());
        assert!(!session.in_flight());
    }

    #[test]
    fn first_decision_fires_no_update() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let choice = agent.decide(&mut session, &snapshot(100, 100), &mut rng);
        assert!(choice.is_some());
        assert!(session.in_flight());
        // nothing to bootstrap from yet: table still empty
        assert!(agent.master.is_empty());
        assert!(session.traces().is_empty());
    }

    #[test]
    fn second_decision_propagates_the_shaped_reward() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(2);
        agent.decide(&mut session, &snapshot(100, 100), &mut rng);
        let last = session.last.clone().unwrap();
        // the opponent lost 30% health between decision points
        agent.decide(&mut session, &snapshot(100, 70), &mut rng);
        let expect = agent.hyper.alpha * (crate::W_HEALTH * 0.3);
        assert!((agent.master.get(&last.0, last.1) - expect).abs() < 1e-9);
    }

    #[test]
    fn win_outscores_loss() {
        let run = |won: bool| {
            let mut agent = greedy_agent();
            let mut session = Session::new();
            let mut rng = SmallRng::seed_from_u64(3);
            agent.decide(&mut session, &snapshot(100, 100), &mut rng);
            let last = session.last.clone().unwrap();
            agent.finish(&mut session, &snapshot(100, 100), won);
            agent.master.get(&last.0, last.1)
        };
        let won = run(true);
        let lost = run(false);
        assert!(won > lost);
        assert!((won - lost - 2.0 * crate::DEFAULT_ALPHA).abs() < 1e-9);
    }

    #[test]
    fn finish_resets_the_session() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(4);
        agent.decide(&mut session, &snapshot(100, 100), &mut rng);
        agent.finish(&mut session, &snapshot(100, 50), true);
        assert!(!session.in_flight());
        assert!(session.traces().is_empty());
    }

    #[test]
    fn abandon_discards_without_attribution() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(5);
        agent.decide(&mut session, &snapshot(100, 100), &mut rng);
        agent.decide(&mut session, &snapshot(90, 80), &mut rng);
        let before: Vec<_> = agent.master.iter().map(|(k, v)| (k.clone(), *v)).collect();
        agent.abandon(&mut session);
        assert!(!session.in_flight());
        assert!(session.traces().is_empty());
        // no terminal reward leaked into the tables
        let after: Vec<_> = agent.master.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn sub_trace_outlives_the_delegation_turn() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(8);
        let mut snap = snapshot(100, 100);
        snap.force_switch = true;
        snap.switch_candidates = vec![unit("golem", 100), unit("jolteon", 100)];
        agent.decide(&mut session, &snap, &mut rng);
        let context = session.last_sub.clone().unwrap();
        let factor = agent.hyper.gamma * agent.hyper.lambda;
        // greedy direct moves decay the sub chain rather than cutting it
        agent.decide(&mut session, &snapshot(100, 100), &mut rng);
        assert!((session.traces().sub_trace(&context) - factor).abs() < 1e-12);
        agent.decide(&mut session, &snapshot(100, 100), &mut rng);
        assert!((session.traces().sub_trace(&context) - factor * factor).abs() < 1e-12);
    }

    #[test]
    fn delegation_records_the_switch_context() {
        let mut agent = greedy_agent();
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(6);
        let mut snap = snapshot(100, 100);
        snap.force_switch = true;
        snap.switch_candidates = vec![unit("golem", 100), unit("jolteon", 100)];
        let choice = agent.decide(&mut session, &snap, &mut rng).unwrap();
        match choice {
            Choice::Switch(idx) => assert!(idx < 2),
            other => panic!("expected a switch, got {:?}", other),
        }
        assert!(session.last_sub.is_some());
        assert!(session.last_sub_greedy);
    }
}
