pub mod tab_strip;
