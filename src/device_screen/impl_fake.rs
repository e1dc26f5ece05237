use crate::device_screen::interface::{DeviceScreen, UserAction, View};
use std::collections::VecDeque;
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

type ViewMatcher = Box<dyn Fn(&View) -> bool + Send + Sync>;

/// Records every shown view and presses the next scripted button once the
/// view it waits for appears.
#[allow(dead_code)]
pub struct DeviceScreenFake {
    views: Arc<Mutex<Vec<View>>>,
    script: VecDeque<(ViewMatcher, UserAction)>,
    sender: Sender<UserAction>,
    receiver: Mutex<Option<Receiver<UserAction>>>,
}

#[allow(dead_code)]
impl DeviceScreenFake {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            views: Arc::new(Mutex::new(vec![])),
            script: VecDeque::new(),
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn when<F>(mut self, matcher: F, action: UserAction) -> Self
    where
        F: Fn(&View) -> bool + Send + Sync + 'static,
    {
        self.script.push_back((Box::new(matcher), action));
        self
    }

    pub fn views(&self) -> Arc<Mutex<Vec<View>>> {
        self.views.clone()
    }
}

impl DeviceScreen for DeviceScreenFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.views.lock().map_err(|e| e.to_string())?.push(view.clone());

        let matched = self
            .script
            .front()
            .is_some_and(|(matcher, _)| matcher(view));
        if matched {
            if let Some((_, action)) = self.script.pop_front() {
                self.sender.send(action)?;
            }
        }
        Ok(())
    }

    fn events(&self) -> Receiver<UserAction> {
        match self.receiver.lock().ok().and_then(|mut r| r.take()) {
            Some(receiver) => receiver,
            None => channel().1,
        }
    }
}
