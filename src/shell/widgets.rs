// Widget factory backing the coordinator's collaborators with egui models
use super::chrome::{Chrome, ChromeModel};
use super::folder_view::{FolderModel, FolderView};
use super::side_panel::{PanelModel, PlacesPanel};
use kura::collab::{ContentView, ControlSurface, SidePanel, WidgetFactory};
use kura::message::Message;
use kura::model::{Location, TabId, WindowId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Messages raised by widgets while rendering, delivered after the frame.
pub type Outbox = Rc<RefCell<Vec<(WindowId, Message)>>>;

pub type Shared<T> = Rc<RefCell<T>>;

/// Keeps the models of every live widget so the renderer can find them.
#[derive(Default)]
pub struct ShellWidgets {
    pub outbox: Outbox,
    folders: RefCell<HashMap<(WindowId, TabId), Shared<FolderModel>>>,
    panels: RefCell<HashMap<(WindowId, TabId), Shared<PanelModel>>>,
    chromes: RefCell<HashMap<WindowId, Shared<ChromeModel>>>,
}

impl ShellWidgets {
    pub fn folder(&self, window: WindowId, tab: TabId) -> Option<Shared<FolderModel>> {
        self.folders.borrow().get(&(window, tab)).cloned()
    }

    pub fn panel(&self, window: WindowId, tab: TabId) -> Option<Shared<PanelModel>> {
        self.panels.borrow().get(&(window, tab)).cloned()
    }

    pub fn chrome(&self, window: WindowId) -> Option<Shared<ChromeModel>> {
        self.chromes.borrow().get(&window).cloned()
    }

    /// Drop models whose widgets were detached.
    pub fn collect_garbage(&self) {
        self.folders.borrow_mut().retain(|_, m| !m.borrow().detached);
        self.panels.borrow_mut().retain(|_, m| !m.borrow().detached);
        self.chromes.borrow_mut().retain(|_, m| !m.borrow().closed);
    }

    pub fn drain_outbox(&self) -> Vec<(WindowId, Message)> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }
}

impl WidgetFactory for ShellWidgets {
    fn content_view(
        &self,
        window: WindowId,
        tab: TabId,
        _location: &Location,
    ) -> Option<Box<dyn ContentView>> {
        let model = Rc::new(RefCell::new(FolderModel::new(window, tab)));
        self.folders.borrow_mut().insert((window, tab), model.clone());
        Some(Box::new(FolderView::new(model)))
    }

    fn side_panel(&self, window: WindowId, tab: TabId) -> Box<dyn SidePanel> {
        let model = Rc::new(RefCell::new(PanelModel::default()));
        self.panels.borrow_mut().insert((window, tab), model.clone());
        Box::new(PlacesPanel::new(model))
    }

    fn controls(&self, window: WindowId) -> Box<dyn ControlSurface> {
        let model = Rc::new(RefCell::new(ChromeModel::default()));
        self.chromes.borrow_mut().insert(window, model.clone());
        Box::new(Chrome::new(model))
    }
}
